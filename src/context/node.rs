use crate::animation::time::TimeMapping;
use crate::context::brush::{Fill, Stroke};
use crate::context::value::ContextValue;
use crate::context::visibility::VisibilityWindow;
use crate::foundation::core::{Color, Size, Vec2};
use crate::model::layer::{BlendMode, MaskMode, MatteType};
use crate::model::shape::PathGeometry;
use std::sync::Arc;

/// One inheritable rendering attribute, or an ordered run of them.
///
/// Contexts are immutable; every rewrite builds a new value. Sequences are listed outermost first:
/// for `[c0, c1, .., cn]` a content point `x` lands at `M(c0) * M(c1) * .. * M(cn) * x`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RenderingContext {
    /// No context; identity for composition.
    #[default]
    Null,
    /// Flat, ordered run of at least two non-composite, non-null nodes.
    Composite(Arc<[RenderingContext]>),
    /// Translation.
    Position(ContextValue<Vec2>),
    /// Per-axis percentage around the current pivot.
    Scale(ContextValue<Vec2>),
    /// Degrees around the current pivot.
    Rotation(ContextValue<f64>),
    /// Shifts content by `-anchor` and makes `anchor` the pivot for later rotation and scale.
    Anchor(ContextValue<Vec2>),
    /// Sets the pivot for later rotation and scale without moving content.
    CenterPoint(ContextValue<Vec2>),
    /// Multiplies the opacity of everything inside.
    Opacity(ContextValue<f64>),
    /// Frames at which the content is drawn.
    Visibility(VisibilityWindow),
    /// Clip to `[0, w] x [0, h]` of the current frame.
    Clip(Size),
    /// Layer bounds; clips like [`RenderingContext::Clip`].
    Size(Size),
    /// Compositing mode of the content.
    BlendMode(BlendMode),
    /// Fill paint for shape content.
    Fill(Fill),
    /// Stroke paint for shape content.
    Stroke(Stroke),
    /// Masks, in the current frame.
    Mask(Arc<[MaskShape]>),
    /// Diagnostic naming.
    Metadata(Metadata),
    /// Inner frame zero plays at this outer frame.
    TimeOffset(f64),
    /// Outer frames per inner frame.
    TimeStretch(f64),
    /// Use the layer above as a matte.
    MatteType(MatteType),
    /// Post-processing effect.
    Effect(Arc<EffectContext>),
    /// Attribute that could not be translated, named.
    Unsupported(String),
    /// Winding of shape content.
    DrawingDirection(PathDirection),
}

/// Discriminant of [`RenderingContext`], used to select nodes by type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextKind {
    /// [`RenderingContext::Null`].
    Null,
    /// [`RenderingContext::Composite`].
    Composite,
    /// [`RenderingContext::Position`].
    Position,
    /// [`RenderingContext::Scale`].
    Scale,
    /// [`RenderingContext::Rotation`].
    Rotation,
    /// [`RenderingContext::Anchor`].
    Anchor,
    /// [`RenderingContext::CenterPoint`].
    CenterPoint,
    /// [`RenderingContext::Opacity`].
    Opacity,
    /// [`RenderingContext::Visibility`].
    Visibility,
    /// [`RenderingContext::Clip`].
    Clip,
    /// [`RenderingContext::Size`].
    Size,
    /// [`RenderingContext::BlendMode`].
    BlendMode,
    /// [`RenderingContext::Fill`].
    Fill,
    /// [`RenderingContext::Stroke`].
    Stroke,
    /// [`RenderingContext::Mask`].
    Mask,
    /// [`RenderingContext::Metadata`].
    Metadata,
    /// [`RenderingContext::TimeOffset`].
    TimeOffset,
    /// [`RenderingContext::TimeStretch`].
    TimeStretch,
    /// [`RenderingContext::MatteType`].
    MatteType,
    /// [`RenderingContext::Effect`].
    Effect,
    /// [`RenderingContext::Unsupported`].
    Unsupported,
    /// [`RenderingContext::DrawingDirection`].
    DrawingDirection,
}

/// Diagnostic naming only; carries no rendering semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Layer name.
    pub name: String,
    /// Layer index, when the node names a layer.
    pub layer_index: Option<i64>,
}

/// One mask of a [`RenderingContext::Mask`] node.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskShape {
    /// Combination with earlier masks.
    pub mode: MaskMode,
    /// Outline.
    pub path: ContextValue<PathGeometry>,
    /// Fraction in `[0, 1]`.
    pub opacity: ContextValue<f64>,
    /// Keep the outside instead of the inside.
    pub inverted: bool,
}

/// Effect parameters carried by a [`RenderingContext::Effect`] node.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectContext {
    /// Gaussian blur.
    GaussianBlur {
        /// Blur radius in pixels.
        blurriness: ContextValue<f64>,
    },
    /// Drop shadow.
    DropShadow {
        /// Shadow color.
        color: ContextValue<Color>,
        /// Fraction in `[0, 1]`.
        opacity: ContextValue<f64>,
        /// Degrees.
        direction: ContextValue<f64>,
        /// Pixels.
        distance: ContextValue<f64>,
        /// Blur radius in pixels.
        softness: ContextValue<f64>,
    },
    /// Effect kept by name only.
    Unsupported {
        /// Effect name.
        name: String,
    },
}

/// Winding of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathDirection {
    /// As authored.
    #[default]
    Forward,
    /// Reversed.
    Reversed,
}

impl EffectContext {
    /// Whether any parameter is keyframed.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::GaussianBlur { blurriness } => blurriness.is_animated(),
            Self::DropShadow {
                color,
                opacity,
                direction,
                distance,
                softness,
            } => {
                color.is_animated()
                    || opacity.is_animated()
                    || direction.is_animated()
                    || distance.is_animated()
                    || softness.is_animated()
            }
            Self::Unsupported { .. } => false,
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        match self {
            Self::GaussianBlur { blurriness } => Self::GaussianBlur {
                blurriness: blurriness.remap_time(mapping),
            },
            Self::DropShadow {
                color,
                opacity,
                direction,
                distance,
                softness,
            } => Self::DropShadow {
                color: color.remap_time(mapping),
                opacity: opacity.remap_time(mapping),
                direction: direction.remap_time(mapping),
                distance: distance.remap_time(mapping),
                softness: softness.remap_time(mapping),
            },
            Self::Unsupported { .. } => self.clone(),
        }
    }
}

impl MaskShape {
    fn remap_time(&self, mapping: TimeMapping) -> Self {
        Self {
            mode: self.mode,
            path: self.path.remap_time(mapping),
            opacity: self.opacity.remap_time(mapping),
            inverted: self.inverted,
        }
    }
}

impl RenderingContext {
    /// Discriminant of this node.
    pub fn kind(&self) -> ContextKind {
        match self {
            Self::Null => ContextKind::Null,
            Self::Composite(_) => ContextKind::Composite,
            Self::Position(_) => ContextKind::Position,
            Self::Scale(_) => ContextKind::Scale,
            Self::Rotation(_) => ContextKind::Rotation,
            Self::Anchor(_) => ContextKind::Anchor,
            Self::CenterPoint(_) => ContextKind::CenterPoint,
            Self::Opacity(_) => ContextKind::Opacity,
            Self::Visibility(_) => ContextKind::Visibility,
            Self::Clip(_) => ContextKind::Clip,
            Self::Size(_) => ContextKind::Size,
            Self::BlendMode(_) => ContextKind::BlendMode,
            Self::Fill(_) => ContextKind::Fill,
            Self::Stroke(_) => ContextKind::Stroke,
            Self::Mask(_) => ContextKind::Mask,
            Self::Metadata(_) => ContextKind::Metadata,
            Self::TimeOffset(_) => ContextKind::TimeOffset,
            Self::TimeStretch(_) => ContextKind::TimeStretch,
            Self::MatteType(_) => ContextKind::MatteType,
            Self::Effect(_) => ContextKind::Effect,
            Self::Unsupported(_) => ContextKind::Unsupported,
            Self::DrawingDirection(_) => ContextKind::DrawingDirection,
        }
    }

    /// Whether this node is of `kind`.
    pub fn is(&self, kind: ContextKind) -> bool {
        self.kind() == kind
    }

    /// Ordered sub-contexts: empty for `Null`, the run for `Composite`, otherwise just `self`.
    pub fn children(&self) -> &[RenderingContext] {
        match self {
            Self::Null => &[],
            Self::Composite(items) => items,
            other => std::slice::from_ref(other),
        }
    }

    /// Whether this is [`RenderingContext::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// True if this node or any descendant carries keyframed data.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::Composite(items) => items.iter().any(Self::is_animated),
            Self::Position(v) | Self::Scale(v) | Self::Anchor(v) | Self::CenterPoint(v) => {
                v.is_animated()
            }
            Self::Rotation(v) | Self::Opacity(v) => v.is_animated(),
            Self::Fill(f) => f.brush.is_animated() || f.opacity.is_animated(),
            Self::Stroke(s) => {
                s.brush.is_animated() || s.opacity.is_animated() || s.width.is_animated()
            }
            Self::Mask(masks) => masks
                .iter()
                .any(|m| m.path.is_animated() || m.opacity.is_animated()),
            Self::Effect(e) => e.is_animated(),
            Self::Null
            | Self::Visibility(_)
            | Self::Clip(_)
            | Self::Size(_)
            | Self::BlendMode(_)
            | Self::Metadata(_)
            | Self::TimeOffset(_)
            | Self::TimeStretch(_)
            | Self::MatteType(_)
            | Self::Unsupported(_)
            | Self::DrawingDirection(_) => false,
        }
    }

    /// Whether a `Fill` or `Stroke` paints with a gradient, whose endpoints depend on position.
    pub fn is_gradient_paint(&self) -> bool {
        match self {
            Self::Fill(f) => f.brush.is_gradient(),
            Self::Stroke(s) => s.brush.is_gradient(),
            _ => false,
        }
    }

    /// Re-express every time-dependent payload through `mapping` (local frame to parent frame).
    ///
    /// `TimeOffset`/`TimeStretch` nodes are left as they are.
    pub fn with_time_mapping(&self, mapping: TimeMapping) -> Self {
        if mapping.is_identity() {
            return self.clone();
        }
        match self {
            Self::Composite(items) => Self::compose(items.iter().map(|c| c.with_time_mapping(mapping))),
            Self::Position(v) => Self::Position(v.remap_time(mapping)),
            Self::Scale(v) => Self::Scale(v.remap_time(mapping)),
            Self::Rotation(v) => Self::Rotation(v.remap_time(mapping)),
            Self::Anchor(v) => Self::Anchor(v.remap_time(mapping)),
            Self::CenterPoint(v) => Self::CenterPoint(v.remap_time(mapping)),
            Self::Opacity(v) => Self::Opacity(v.remap_time(mapping)),
            Self::Visibility(w) => Self::Visibility(w.remap_time(mapping)),
            Self::Fill(f) => Self::Fill(f.remap_time(mapping)),
            Self::Stroke(s) => Self::Stroke(s.remap_time(mapping)),
            Self::Mask(masks) => Self::Mask(masks.iter().map(|m| m.remap_time(mapping)).collect()),
            Self::Effect(e) => Self::Effect(Arc::new(e.remap_time(mapping))),
            Self::Null
            | Self::Clip(_)
            | Self::Size(_)
            | Self::BlendMode(_)
            | Self::Metadata(_)
            | Self::TimeOffset(_)
            | Self::TimeStretch(_)
            | Self::MatteType(_)
            | Self::Unsupported(_)
            | Self::DrawingDirection(_) => self.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/context/node.rs"]
mod tests;
