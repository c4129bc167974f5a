use crate::animation::anim::{Animatable, Lerp};
use crate::animation::time::TimeMapping;
use std::sync::Arc;

/// Payload of a context node: either a concrete value or a shared keyframed track.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue<T> {
    /// Holds for all time.
    Static(T),
    /// Keyframed track.
    Animated(Arc<Animatable<T>>),
}

impl<T: Clone + PartialEq> ContextValue<T> {
    /// Collapse tracks whose keyframes all agree into a `Static` value.
    pub fn from_animatable(anim: &Animatable<T>) -> Self {
        match anim.as_constant() {
            Some(v) => Self::Static(v.clone()),
            None => Self::Animated(Arc::new(anim.clone())),
        }
    }

    /// Whether this is `Animated`.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated(_))
    }

    /// The value, if `Static`.
    pub fn as_static(&self) -> Option<&T> {
        match self {
            Self::Static(v) => Some(v),
            Self::Animated(_) => None,
        }
    }

    /// Static value, or the value before the first keyframe.
    pub fn initial(&self) -> &T {
        match self {
            Self::Static(v) => v,
            Self::Animated(a) => a.initial(),
        }
    }

    /// Apply `f` to the static value or to every keyframe value.
    pub fn map(&self, f: impl Fn(&T) -> T) -> Self {
        match self {
            Self::Static(v) => Self::Static(f(v)),
            Self::Animated(a) => Self::Animated(Arc::new(a.map_values(f))),
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        match self {
            Self::Animated(a) if !mapping.is_identity() => {
                Self::Animated(Arc::new(a.remap_time(mapping)))
            }
            other => other.clone(),
        }
    }

    /// Whether this is a `Static` equal to `identity`.
    pub fn is_static_value(&self, identity: &T) -> bool {
        self.as_static() == Some(identity)
    }
}

impl<T: Lerp + Clone> ContextValue<T> {
    /// Value at `frame`.
    pub fn sample(&self, frame: f64) -> T {
        match self {
            Self::Static(v) => v.clone(),
            Self::Animated(a) => a.sample(frame),
        }
    }
}

impl<T> From<T> for ContextValue<T> {
    fn from(v: T) -> Self {
        Self::Static(v)
    }
}
