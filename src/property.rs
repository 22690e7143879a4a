use alloc::vec::Vec;

use rgb::RGBA;

pub type Frame = u64;

/// Values a [`Timeline`] can blend between two keyframes.
pub trait Interpolate: Clone {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolate for RGBA<f32> {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        RGBA::new(
            self.r.interpolate(&other.r, t),
            self.g.interpolate(&other.g, t),
            self.b.interpolate(&other.b, t),
            self.a.interpolate(&other.a, t),
        )
    }
}

/// Keyframed values, ordered by frame.
///
/// Before the first key the first value holds, after the last key the last
/// value holds; in between values are linearly interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline<T> {
    keys: Vec<(Frame, T)>,
}

impl<T: Interpolate> Timeline<T> {
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Adds a key, replacing any existing key at the same frame.
    pub fn with_key(mut self, frame: Frame, value: T) -> Self {
        self.insert(frame, value);
        self
    }

    pub fn insert(&mut self, frame: Frame, value: T) {
        match self.keys.binary_search_by_key(&frame, |(f, _)| *f) {
            Ok(i) => self.keys[i].1 = value,
            Err(i) => self.keys.insert(i, (frame, value)),
        }
    }

    pub fn keys(&self) -> &[(Frame, T)] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn sample(&self, frame: Frame) -> Option<T> {
        let next = self.keys.partition_point(|(f, _)| *f <= frame);
        match (next.checked_sub(1).map(|i| &self.keys[i]), self.keys.get(next)) {
            (None, None) => None,
            (Some((_, v)), None) => Some(v.clone()),
            (None, Some((_, v))) => Some(v.clone()),
            (Some((f0, v0)), Some((f1, v1))) => {
                let t = (frame - f0) as f32 / (f1 - f0) as f32;
                Some(v0.interpolate(v1, t))
            }
        }
    }
}

impl<T: Interpolate> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A material field: either a fixed value or a source sampled per frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Property<T> {
    Constant(T),
    Sampled(Timeline<T>),
}

impl<T: Interpolate> Property<T> {
    pub fn is_constant(&self) -> bool {
        match self {
            Property::Constant(_) => true,
            Property::Sampled(t) => t.keys().len() <= 1,
        }
    }

    /// Value at `frame`, or `None` when the source has nothing to offer.
    pub fn resolve(&self, frame: Frame) -> Option<T> {
        match self {
            Property::Constant(v) => Some(v.clone()),
            Property::Sampled(t) => t.sample(frame),
        }
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Property::Constant(value)
    }
}

impl<T> From<Timeline<T>> for Property<T> {
    fn from(timeline: Timeline<T>) -> Self {
        Property::Sampled(timeline)
    }
}

/// Resolves an optional property, falling back to `default` when it is
/// unset or yields nothing at `frame`.
pub fn value_or_default<T: Interpolate>(property: Option<&Property<T>>, frame: Frame, default: T) -> T {
    property.and_then(|p| p.resolve(frame)).unwrap_or(default)
}
