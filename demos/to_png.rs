use std::env::args;
use std::fs::write;
use png::Encoder;
use png::ColorType::Rgba;
use png::BitDepth::Eight;
use flowline::*;
use flowline::material::FlowMaterialOptions;
use flowline::preview::Viewport;
use std::time::Instant;
use rgb::{FromSlice, RGBA};

fn main() {
	let prefix = args().nth(1).unwrap_or_else(|| "flow".into());

	let start = Waypoint::new(116.39, 39.91, 50.0);
	let end = Waypoint::new(121.47, 31.23, 4.0);
	let arc = sample_arc(start.position, end.position, 100000.0, 100);

	let mut registry = MaterialRegistry::new();
	register_flow_material(&mut registry);

	let material = FlowMaterialProperty::new(FlowMaterialOptions {
		color: Some(RGBA::new(100.0f32 / 255.0, 1.0, 80.0 / 255.0, 1.0).into()),
		speed: Some(Property::Constant(10.0)),
		..Default::default()
	});

	let (w, h) = (400, 300);
	let viewport = Viewport::around(&arc, 1.0, 0.0004);
	let mut renderer = PreviewRenderer::new(w, h, viewport);
	let mut canvas: Vec<u8> = vec![0; w * h * 4];

	let now = Instant::now();
	for frame in (0..100).step_by(20) {
		let uniforms = material.evaluate(frame);
		let pixels = canvas.as_rgba_mut();
		renderer.clear(pixels, w);
		renderer.render::<4>(pixels, w, &arc, &uniforms, frame, 3.0, true);

		let mut png_buf = Vec::new();
		{
			let mut encoder = Encoder::new(&mut png_buf, w as u32, h as u32);
			encoder.set_color(Rgba);
			encoder.set_depth(Eight);
			let mut writer = encoder.write_header().unwrap();
			writer.write_image_data(&canvas).unwrap();
		}
		write(format!("{}-{:03}.png", &prefix, frame), &png_buf).unwrap();
	}
	println!("rendered 5 frames in {}ms.", now.elapsed().as_millis());
}
