use crate::property::value_or_default;
use crate::property::Frame;
use crate::property::Property;
use crate::shader::FLOW_MATERIAL_TYPE;

use alloc::boxed::Box;
use alloc::vec::Vec;

use rgb::RGBA;

pub type Color = RGBA<f32>;

pub const DEFAULT_COLOR: Color = RGBA { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
pub const DEFAULT_SPEED: f32 = 5.0;
pub const DEFAULT_PERCENT: f32 = 0.1;
pub const DEFAULT_GRADIENT: f32 = 0.01;

/// Uniform values fed to the flow shader for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlowUniforms {
    pub color: Color,
    pub speed: f32,
    pub percent: f32,
    pub gradient: f32,
}

impl Default for FlowUniforms {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            speed: DEFAULT_SPEED,
            percent: DEFAULT_PERCENT,
            gradient: DEFAULT_GRADIENT,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Color,
    Speed,
    Percent,
    Gradient,
}

pub type ListenerId = usize;

/// Aggregated "definition changed" signal.
#[derive(Default)]
pub struct DefinitionChanged {
    listeners: Vec<(ListenerId, Box<dyn FnMut(Field)>)>,
    next_id: ListenerId,
}

impl DefinitionChanged {
    pub fn subscribe<F: FnMut(Field) + 'static>(&mut self, listener: F) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(i, _)| *i != id);
        before != self.listeners.len()
    }

    pub fn listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn raise(&mut self, field: Field) {
        log::trace!("flow material {:?} changed, notifying {} listeners", field, self.listeners.len());
        for (_, listener) in self.listeners.iter_mut() {
            listener(field);
        }
    }
}

impl core::fmt::Debug for DefinitionChanged {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DefinitionChanged")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowMaterialOptions {
    pub color: Option<Property<Color>>,
    pub speed: Option<Property<f32>>,
    pub percent: Option<Property<f32>>,
    pub gradient: Option<Property<f32>>,
}

/// Animated material moving a highlight band along a line.
///
/// Fields left unset evaluate to their defaults. The band position is not
/// stored here: it is derived from the frame number by the shader (see
/// [`crate::shader::flow_alpha`]).
#[derive(Debug, Default)]
pub struct FlowMaterialProperty {
    color: Option<Property<Color>>,
    speed: Option<Property<f32>>,
    percent: Option<Property<f32>>,
    gradient: Option<Property<f32>>,
    definition_changed: DefinitionChanged,
}

macro_rules! field_accessors {
    ($get:ident, $set:ident, $clear:ident, $field:ident, $tag:expr, $t:ty) => {
        pub fn $get(&self) -> Option<&Property<$t>> {
            self.$field.as_ref()
        }

        pub fn $set<P: Into<Property<$t>>>(&mut self, value: P) {
            self.replace(Some(value.into()), |m| &mut m.$field, $tag);
        }

        pub fn $clear(&mut self) {
            self.replace(None, |m| &mut m.$field, $tag);
        }
    };
}

impl FlowMaterialProperty {
    pub fn new(options: FlowMaterialOptions) -> Self {
        Self {
            color: options.color,
            speed: options.speed,
            percent: options.percent,
            gradient: options.gradient,
            definition_changed: DefinitionChanged::default(),
        }
    }

    field_accessors!(color, set_color, clear_color, color, Field::Color, Color);
    field_accessors!(speed, set_speed, clear_speed, speed, Field::Speed, f32);
    field_accessors!(percent, set_percent, clear_percent, percent, Field::Percent, f32);
    field_accessors!(gradient, set_gradient, clear_gradient, gradient, Field::Gradient, f32);

    // raises a change event only if the value differs
    fn replace<T: PartialEq>(
        &mut self,
        value: Option<Property<T>>,
        field: fn(&mut Self) -> &mut Option<Property<T>>,
        tag: Field,
    ) {
        let slot = field(self);
        if *slot != value {
            *slot = value;
            self.definition_changed.raise(tag);
        }
    }

    /// Always false: the material animates even when every field is fixed.
    pub fn is_constant(&self) -> bool {
        false
    }

    pub fn material_type(&self) -> &'static str {
        FLOW_MATERIAL_TYPE
    }

    pub fn definition_changed(&mut self) -> &mut DefinitionChanged {
        &mut self.definition_changed
    }

    pub fn evaluate(&self, frame: Frame) -> FlowUniforms {
        FlowUniforms {
            color: value_or_default(self.color.as_ref(), frame, DEFAULT_COLOR),
            speed: value_or_default(self.speed.as_ref(), frame, DEFAULT_SPEED),
            percent: value_or_default(self.percent.as_ref(), frame, DEFAULT_PERCENT),
            gradient: value_or_default(self.gradient.as_ref(), frame, DEFAULT_GRADIENT),
        }
    }
}

impl PartialEq for FlowMaterialProperty {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.speed == other.speed
            && self.percent == other.percent
            && self.gradient == other.gradient
    }
}
