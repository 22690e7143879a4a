#![no_std]
extern crate alloc;

pub mod geodesy;
pub mod parabola;
pub mod property;
pub mod material;
pub mod shader;
pub mod effect;
pub mod preview;


#[doc(inline)]
pub use {
    geodesy::GeoPoint,
    geodesy::Waypoint,
    geodesy::Ellipsoid,
    parabola::Arc,
    parabola::sample_arc,
    property::Property,
    property::Timeline,
    material::FlowMaterialProperty,
    material::FlowUniforms,
    shader::MaterialRegistry,
    shader::register_flow_material,
    effect::parabola_flow_init,
    preview::PreviewRenderer,
};
