use crate::animation::time::TimeMapping;
use crate::context::value::ContextValue;
use crate::foundation::core::{Color, Vec2};
use crate::model::shape::{GradientKind, GradientStops};
use std::sync::Arc;

/// Paint source shared between renderings.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    /// One color everywhere.
    Solid(ContextValue<Color>),
    /// Linear or radial gradient.
    Gradient(GradientBrush),
}

/// Gradient with endpoints expressed in the coordinate frame where the paint node sits.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientBrush {
    /// Linear or radial.
    pub kind: GradientKind,
    /// Where the first stop sits.
    pub start: ContextValue<Vec2>,
    /// Where the last stop sits.
    pub end: ContextValue<Vec2>,
    /// Radial focal offset, percent of the radius.
    pub highlight_length: f64,
    /// Radial focal direction, degrees.
    pub highlight_angle: f64,
    /// Color stops.
    pub stops: ContextValue<GradientStops>,
}

impl Brush {
    /// Whether this is a gradient.
    pub fn is_gradient(&self) -> bool {
        matches!(self, Self::Gradient(_))
    }

    /// Whether colors, stops or endpoints are keyframed.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::Solid(c) => c.is_animated(),
            Self::Gradient(g) => {
                g.start.is_animated() || g.end.is_animated() || g.stops.is_animated()
            }
        }
    }

    /// Shift gradient endpoints by `offset`. Solid brushes are position independent.
    pub fn with_offset(&self, offset: Vec2) -> Self {
        match self {
            Self::Solid(_) => self.clone(),
            Self::Gradient(g) => Self::Gradient(GradientBrush {
                start: g.start.map(|p| *p + offset),
                end: g.end.map(|p| *p + offset),
                ..g.clone()
            }),
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        match self {
            Self::Solid(c) => Self::Solid(c.remap_time(mapping)),
            Self::Gradient(g) => Self::Gradient(GradientBrush {
                start: g.start.remap_time(mapping),
                end: g.end.remap_time(mapping),
                stops: g.stops.remap_time(mapping),
                ..g.clone()
            }),
        }
    }
}

/// Fill paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// Paint source.
    pub brush: Arc<Brush>,
    /// Fraction in `[0, 1]`.
    pub opacity: ContextValue<f64>,
}

/// Stroke paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    /// Paint source.
    pub brush: Arc<Brush>,
    /// Fraction in `[0, 1]`.
    pub opacity: ContextValue<f64>,
    /// Line width in the frame where the node sits.
    pub width: ContextValue<f64>,
}

impl Fill {
    /// Same fill with gradient endpoints shifted by `offset`.
    pub fn with_brush_offset(&self, offset: Vec2) -> Self {
        Self {
            brush: Arc::new(self.brush.with_offset(offset)),
            opacity: self.opacity.clone(),
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        Self {
            brush: Arc::new(self.brush.remap_time(mapping)),
            opacity: self.opacity.remap_time(mapping),
        }
    }
}

impl Stroke {
    /// Same stroke with gradient endpoints shifted by `offset`.
    pub fn with_brush_offset(&self, offset: Vec2) -> Self {
        Self {
            brush: Arc::new(self.brush.with_offset(offset)),
            ..self.clone()
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        Self {
            brush: Arc::new(self.brush.remap_time(mapping)),
            opacity: self.opacity.remap_time(mapping),
            width: self.width.remap_time(mapping),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/brush.rs"]
mod tests;
