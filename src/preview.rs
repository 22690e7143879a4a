use crate::geodesy::Cartographic;
use crate::geodesy::Degrees;
use crate::material::FlowUniforms;
use crate::parabola::Arc;
use crate::property::Frame;
use crate::shader::flow_alpha;

use wizdraw::stroke;

use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::{RGBA, RGBA8, ComponentMap};

use alloc::{vec, vec::Vec, boxed::Box};

pub type Float = f32;
pub type Couple = Vec2<Float>;

/// Maps a lon/lat rectangle onto the canvas (equirectangular), lifting
/// points by their height.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub west: Degrees,
    pub south: Degrees,
    pub east: Degrees,
    pub north: Degrees,
    /// pixels per meter of height
    pub lift: Float,
}

impl Viewport {
    /// Smallest viewport holding `arc`, grown by `margin` degrees per side.
    pub fn around(arc: &Arc, margin: Degrees, lift: Float) -> Self {
        let mut vp = Self {
            west: Degrees::MAX,
            south: Degrees::MAX,
            east: Degrees::MIN,
            north: Degrees::MIN,
            lift,
        };
        for p in arc.points() {
            vp.west = vp.west.min(p.longitude - margin);
            vp.east = vp.east.max(p.longitude + margin);
            vp.south = vp.south.min(p.latitude - margin);
            vp.north = vp.north.max(p.latitude + margin);
        }
        vp
    }

    pub fn project(&self, point: &Cartographic, w: usize, h: usize) -> Couple {
        let x = (point.longitude - self.west) / (self.east - self.west);
        let y = (self.north - point.latitude) / (self.north - self.south);
        let lifted = (y as Float) * (h as Float) - (point.height as Float) * self.lift;
        Couple::new((x as Float) * (w as Float), lifted)
    }
}

/// Software preview of flow lines: each arc segment is stroked with the
/// flow material's alpha at that point of the line.
pub struct PreviewRenderer {
    width: usize,
    height: usize,
    viewport: Viewport,
    mask: Box<[u8]>,
    flat_path: Vec<Couple>,
    // cumulative projected length at each point, normalized to 0..=1
    lengths: Vec<Float>,
}

impl PreviewRenderer {
    pub fn new(width: usize, height: usize, viewport: Viewport) -> Self {
        Self {
            width,
            height,
            viewport,
            mask: vec![0; width * height].into_boxed_slice(),
            flat_path: Vec::new(),
            lengths: Vec::new(),
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn clear(&self, dst: &mut [RGBA8], stride: usize) {
        let mut i = 0;
        for _ in 0..self.height {
            dst[i..][..self.width].fill(RGBA8::new(0, 0, 0, 0));
            i += stride;
        }
    }

    fn flatten(&mut self, arc: &Arc) {
        let (w, h) = (self.width, self.height);
        self.flat_path.clear();
        self.lengths.clear();

        let mut total = 0.0;
        for point in arc.points() {
            let p = self.viewport.project(point, w, h);
            if let Some(prev) = self.flat_path.last() {
                total += p.distance(*prev);
            }
            self.flat_path.push(p);
            self.lengths.push(total);
        }

        if total > 0.0 {
            self.lengths.iter_mut().for_each(|l| *l /= total);
        }
    }

    pub fn render<const SSAA: usize>(
        &mut self,
        dst: &mut [RGBA8],
        stride: usize,
        arc: &Arc,
        uniforms: &FlowUniforms,
        frame: Frame,
        stroke_width: Float,
        alpha_blend: bool,
    ) {
        let (w, h) = (self.width, self.height);
        let mask_size = Vec2::new(w, h);
        self.flatten(arc);

        let base = uniforms.color.map(|c| c * 255.0);

        for i in 1..self.flat_path.len() {
            let s = (self.lengths[i - 1] + self.lengths[i]) * 0.5;
            let alpha = flow_alpha(s, frame, uniforms).clamp(0.0, 1.0);
            let color = RGBA::new(base.r, base.g, base.b, base.a * alpha);
            let color = color.map(|float| float as u8);
            if color.a == 0 {
                continue;
            }

            let segment = [self.flat_path[i - 1], self.flat_path[i]];
            self.mask.fill(0);
            stroke::<SSAA>(&segment, &mut self.mask, mask_size, stroke_width);

            let mut mask = self.mask.iter();
            let mut line = 0;
            for _ in 0..h {
                for x in 0..w {
                    let q = *mask.next().unwrap();
                    if q != 0 {
                        blend_pixel(&mut dst[line + x], color, q, alpha_blend);
                    }
                }
                line += stride;
            }
        }
    }
}

#[inline(always)]
pub fn blend_pixel(dst_pixel: &mut RGBA8, src_pixel: RGBA8, mask_alpha: u8, alpha_blend_dst: bool) {
    if src_pixel.a == 255 && mask_alpha == 255 {
        *dst_pixel = src_pixel;
    } else {
        let src_alpha = ((src_pixel.a as u32) * (mask_alpha as u32)) / 255;
        let u8_max = u8::MAX as u32;
        let dst_alpha = u8_max - src_alpha;

        let mix = |src: u8, dst: &mut u8| {
            *dst = match alpha_blend_dst {
                true => (((src as u32) * src_alpha + (*dst as u32) * dst_alpha) / u8_max) as u8,
                false => ((src as u32 * src_alpha) / u8_max) as u8,
            };
        };

        mix(src_pixel.r, &mut dst_pixel.r);
        mix(src_pixel.g, &mut dst_pixel.g);
        mix(src_pixel.b, &mut dst_pixel.b);
        mix(src_pixel.a, &mut dst_pixel.a);
    }
}
