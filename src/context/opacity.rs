use crate::animation::anim::{Animatable, Keyframe};
use crate::context::node::RenderingContext;
use crate::context::value::ContextValue;
use crate::foundation::core::Opacity;
use std::sync::Arc;

/// Running product of nested opacity contributions.
///
/// Static factors always fold into the current link. Two animated factors fold only when their
/// keyframe ranges do not overlap; otherwise a new link is started and the older chain is kept in
/// `composed_with`.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeOpacity {
    value: ContextValue<Opacity>,
    composed_with: Option<Arc<CompositeOpacity>>,
}

impl Default for CompositeOpacity {
    fn default() -> Self {
        Self::opaque()
    }
}

impl CompositeOpacity {
    /// Factor 1.
    pub fn opaque() -> Self {
        Self::new(ContextValue::Static(1.0))
    }

    /// A single factor.
    pub fn new(value: ContextValue<Opacity>) -> Self {
        Self {
            value,
            composed_with: None,
        }
    }

    /// Multiply `value` into this composite.
    pub fn compose(&self, value: &ContextValue<Opacity>) -> Self {
        match (&self.value, value) {
            (ContextValue::Static(a), ContextValue::Static(b)) => self.with_value(ContextValue::Static(a * b)),
            (ContextValue::Animated(a), ContextValue::Static(b))
            | (ContextValue::Static(b), ContextValue::Animated(a)) => {
                let k = *b;
                self.with_value(ContextValue::Animated(Arc::new(a.map_values(|v| v * k))))
            }
            (ContextValue::Animated(a), ContextValue::Animated(b)) => {
                match try_compose_animated(a, b) {
                    Some(stitched) => self.with_value(ContextValue::Animated(Arc::new(stitched))),
                    None => Self {
                        value: value.clone(),
                        composed_with: Some(Arc::new(self.clone())),
                    },
                }
            }
        }
    }

    fn with_value(&self, value: ContextValue<Opacity>) -> Self {
        Self {
            value,
            composed_with: self.composed_with.clone(),
        }
    }

    /// Most recent link.
    pub fn value(&self) -> &ContextValue<Opacity> {
        &self.value
    }

    /// Older links, if an animated factor could not be folded.
    pub fn composed_with(&self) -> Option<&CompositeOpacity> {
        self.composed_with.as_deref()
    }

    /// Whether the product varies over time.
    pub fn is_animated(&self) -> bool {
        self.value.is_animated() || self.composed_with.is_some()
    }

    /// The single static factor, if the whole chain is static.
    pub fn static_value(&self) -> Option<Opacity> {
        match (&self.value, &self.composed_with) {
            (ContextValue::Static(v), None) => Some(*v),
            _ => None,
        }
    }

    /// Animated links from most recent to oldest.
    pub fn animatables(&self) -> Vec<Arc<Animatable<Opacity>>> {
        let mut out = Vec::new();
        let mut link = Some(self);
        while let Some(current) = link {
            if let ContextValue::Animated(a) = &current.value {
                out.push(a.clone());
            }
            link = current.composed_with.as_deref();
        }
        out
    }

    /// Product of every link at `frame`.
    pub fn sample(&self, frame: f64) -> Opacity {
        let own = self.value.sample(frame);
        match &self.composed_with {
            Some(older) => own * older.sample(frame),
            None => own,
        }
    }

    /// Equivalent run of `Opacity` nodes, oldest link first. Fully opaque composites yield `Null`.
    pub fn to_context(&self) -> RenderingContext {
        let older = self
            .composed_with
            .as_ref()
            .map(|c| c.to_context())
            .unwrap_or_default();
        let own = if self.value.is_static_value(&1.0) {
            RenderingContext::Null
        } else {
            RenderingContext::Opacity(self.value.clone())
        };
        older + own
    }
}

/// Stitch two animated factors whose keyframe ranges do not overlap.
///
/// Before the later track starts it holds its initial value; after the earlier one ends it holds
/// its final value. The product is therefore the earlier track scaled by the later initial value,
/// followed by the later track scaled by the earlier final value.
fn try_compose_animated(
    a: &Animatable<Opacity>,
    b: &Animatable<Opacity>,
) -> Option<Animatable<Opacity>> {
    let (a0, a1) = a.frame_range()?;
    let (b0, b1) = b.frame_range()?;
    let (first, second) = if a1 <= b0 {
        (a, b)
    } else if b1 <= a0 {
        (b, a)
    } else {
        return None;
    };

    let head = *second.initial();
    let tail = *first.final_value();
    let mut keys: Vec<Keyframe<Opacity>> = first
        .keyframes()
        .iter()
        .map(|k| Keyframe::new(k.frame, k.value * head, k.ease))
        .collect();
    for k in second.keyframes() {
        if keys.last().is_some_and(|last| last.frame >= k.frame) {
            continue;
        }
        keys.push(Keyframe::new(k.frame, k.value * tail, k.ease));
    }
    Animatable::new(keys).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/context/opacity.rs"]
mod tests;
