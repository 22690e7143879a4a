use crate::material::FlowUniforms;
use crate::material::DEFAULT_COLOR;
use crate::material::DEFAULT_PERCENT;
use crate::property::Frame;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::string::ToString;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

pub const FLOW_MATERIAL_TYPE: &str = "LineFlowMaterialType";

/// Fragment stage of the flow material. Hosts compile this as-is; the
/// appearance of the effect is defined by it.
pub const FLOW_SHADER_SOURCE: &str = "
    uniform vec4 color;
    uniform float speed;
    uniform float percent;
    uniform float gradient;
    czm_material czm_getMaterial(czm_materialInput materialInput){
      czm_material material = czm_getDefaultMaterial(materialInput);
      vec2 st = materialInput.st;
      float t =fract(czm_frameNumber * speed / 1000.0);
      t *= (1.0 + percent);
      float alpha = smoothstep(t- percent, t, st.s) * step(-t, -st.s);
      alpha += gradient;
      material.diffuse = color.rgb;
      material.alpha = alpha;
      return material;
    }
    ";

/// GLSL `fract`: `x - floor(x)`, always in `[0, 1)`.
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// GLSL `step`
pub fn step(edge: f32, x: f32) -> f32 {
    match x < edge {
        true => 0.0,
        false => 1.0,
    }
}

/// GLSL `smoothstep`
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Leading edge of the highlight band at `frame`, along the line's
/// length coordinate. Ranges over `[0, 1 + percent)`.
pub fn highlight_head(frame: Frame, uniforms: &FlowUniforms) -> f32 {
    let t = fract(frame as f32 * uniforms.speed / 1000.0);
    t * (1.0 + uniforms.percent)
}

/// CPU rendition of [`FLOW_SHADER_SOURCE`]'s alpha at length coordinate
/// `s` (0 at the start of the line, 1 at its end).
pub fn flow_alpha(s: f32, frame: Frame, uniforms: &FlowUniforms) -> f32 {
    let t = highlight_head(frame, uniforms);
    let band = smoothstep(t - uniforms.percent, t, s) * step(-t, -s);
    band + uniforms.gradient
}

/// An engine-recognized material type.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialDefinition {
    pub kind: String,
    pub source: String,
    pub uniforms: FlowUniforms,
    pub translucent: bool,
}

/// The flow material as registered with the engine. Its uniform defaults
/// only apply to materials built from the type name alone; properties
/// evaluate to [`FlowUniforms::default`] instead.
pub fn flow_material_definition() -> MaterialDefinition {
    MaterialDefinition {
        kind: FLOW_MATERIAL_TYPE.to_string(),
        source: FLOW_SHADER_SOURCE.to_string(),
        uniforms: FlowUniforms {
            color: DEFAULT_COLOR,
            speed: 10.0,
            percent: DEFAULT_PERCENT,
            gradient: 1000.0,
        },
        translucent: true,
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Registration {
    Inserted,
    Replaced,
    Unchanged,
}

/// Material types known to the host engine, keyed by type name.
#[derive(Debug, Clone, Default)]
pub struct MaterialRegistry {
    materials: BTreeMap<String, MaterialDefinition>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: MaterialDefinition) -> Registration {
        let registration = match self.materials.get(&definition.kind) {
            Some(existing) if *existing == definition => return Registration::Unchanged,
            Some(_) => Registration::Replaced,
            None => Registration::Inserted,
        };

        log::info!("material type {}: {:?}", definition.kind, registration);
        self.materials.insert(definition.kind.clone(), definition);
        registration
    }

    pub fn get(&self, kind: &str) -> Option<&MaterialDefinition> {
        self.materials.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.materials.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

/// Registers the flow material type. Safe to call more than once.
pub fn register_flow_material(registry: &mut MaterialRegistry) -> Registration {
    registry.register(flow_material_definition())
}
