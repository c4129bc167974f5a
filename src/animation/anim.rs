use crate::animation::ease::Ease;
use crate::animation::time::TimeMapping;
use crate::foundation::core::{Color, Vec2};
use crate::foundation::error::{IrError, IrResult};
use serde::{Deserialize, Serialize};

/// Linear interpolation between two values of the same type.
pub trait Lerp: Sized {
    /// Value at `t` in `[0, 1]` between `a` and `b`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(
            <f64 as Lerp>::lerp(&a.x, &b.x, t),
            <f64 as Lerp>::lerp(&a.y, &b.y, t),
        )
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Color::rgba(
            <f64 as Lerp>::lerp(&a.r, &b.r, t),
            <f64 as Lerp>::lerp(&a.g, &b.g, t),
            <f64 as Lerp>::lerp(&a.b, &b.b, t),
            <f64 as Lerp>::lerp(&a.a, &b.a, t),
        )
    }
}

/// One keyframe of an [`Animatable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe<T> {
    /// Frame on the owning layer's local timeline.
    pub frame: f64,
    /// Value reached at `frame`.
    pub value: T,
    /// Curve used on the segment arriving at this keyframe.
    #[serde(default)]
    pub ease: Ease,
}

impl<T> Keyframe<T> {
    /// Build a keyframe.
    pub fn new(frame: f64, value: T, ease: Ease) -> Self {
        Self { frame, value, ease }
    }
}

/// A keyframed value. Before the first keyframe the value is `initial`; after the last it holds.
///
/// Frames are strictly increasing and `initial` equals the first keyframe value whenever keyframes
/// exist.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Animatable<T> {
    initial: T,
    keyframes: Vec<Keyframe<T>>,
}

impl<T: Clone> Animatable<T> {
    /// A value with no keyframes.
    pub fn constant(value: T) -> Self {
        Self {
            initial: value,
            keyframes: Vec::new(),
        }
    }

    /// Validate and wrap a non-empty keyframe list with finite, strictly increasing frames.
    pub fn new(keyframes: Vec<Keyframe<T>>) -> IrResult<Self> {
        let Some(first) = keyframes.first() else {
            return Err(IrError::animation("keyframe list must not be empty"));
        };
        for k in &keyframes {
            if !k.frame.is_finite() {
                return Err(IrError::animation(format!(
                    "keyframe frame {} is not finite",
                    k.frame
                )));
            }
        }
        if keyframes.windows(2).any(|w| w[0].frame >= w[1].frame) {
            return Err(IrError::animation(
                "keyframe frames must be strictly increasing",
            ));
        }
        Ok(Self {
            initial: first.value.clone(),
            keyframes,
        })
    }

    /// Value before the first keyframe.
    pub fn initial(&self) -> &T {
        &self.initial
    }

    /// Value held after the last keyframe.
    pub fn final_value(&self) -> &T {
        self.keyframes
            .last()
            .map(|k| &k.value)
            .unwrap_or(&self.initial)
    }

    /// Keyframes in frame order; empty for a constant.
    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    /// More than one keyframe. A single keyframe is a constant in disguise.
    pub fn is_animated(&self) -> bool {
        self.keyframes.len() > 1
    }

    /// Closed frame range spanned by the keyframes.
    pub fn frame_range(&self) -> Option<(f64, f64)> {
        match (self.keyframes.first(), self.keyframes.last()) {
            (Some(a), Some(b)) => Some((a.frame, b.frame)),
            _ => None,
        }
    }

    /// Apply `f` to every value, keeping frames and easing.
    pub fn map_values<U: Clone>(&self, f: impl Fn(&T) -> U) -> Animatable<U> {
        Animatable {
            initial: f(&self.initial),
            keyframes: self
                .keyframes
                .iter()
                .map(|k| Keyframe::new(k.frame, f(&k.value), k.ease))
                .collect(),
        }
    }

    /// Re-express keyframe frames in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        if mapping.is_identity() {
            return self.clone();
        }
        Self {
            initial: self.initial.clone(),
            keyframes: self
                .keyframes
                .iter()
                .map(|k| Keyframe::new(mapping.apply(k.frame), k.value.clone(), k.ease))
                .collect(),
        }
    }

    /// Returns `Some(value)` when every keyframe carries the same value.
    pub fn as_constant(&self) -> Option<&T>
    where
        T: PartialEq,
    {
        if self.keyframes.iter().all(|k| k.value == self.initial) {
            Some(&self.initial)
        } else {
            None
        }
    }
}

impl<T: Lerp + Clone> Animatable<T> {
    /// Value at `frame`, eased per segment.
    pub fn sample(&self, frame: f64) -> T {
        let keys = &self.keyframes;
        if keys.is_empty() {
            return self.initial.clone();
        }

        let idx = keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return self.initial.clone();
        }
        if idx >= keys.len() {
            return keys[keys.len() - 1].value.clone();
        }

        let a = &keys[idx - 1];
        let b = &keys[idx];
        let t = (frame - a.frame) / (b.frame - a.frame);
        match b.ease {
            Ease::Hold => a.value.clone(),
            ease => T::lerp(&a.value, &b.value, ease.apply(t)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Animatable<T>
where
    T: Deserialize<'de> + Clone,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<T> {
            Keyframes { keyframes: Vec<Keyframe<T>> },
            /// JSON shorthand: a bare value is a constant.
            Constant(T),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Keyframes { keyframes } => {
                Self::new(keyframes).map_err(|e| serde::de::Error::custom(e.to_string()))
            }
            Repr::Constant(v) => Ok(Self::constant(v)),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
