//! Lottie rendering-context intermediate representation.
//!
//! A [`Composition`] is detreeified into flat [`Rendering`] pairs, each context is brought onto one
//! timebase and optimized to a fixed point, and the results are grouped into Z-ordered layers of
//! mutually orthogonal renderings. [`translate`] runs the whole pipeline.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

mod animation;
mod context;
mod detreeify;
mod eval;
mod grouping;
mod model;
mod optimize;
mod rendering;
mod session;

pub use foundation::core::{
    Affine, BezPath, Color, Degrees, Opacity, Point, Rect, ScalePercent, Size, Vec2,
};
pub use foundation::error::{IrError, IrResult};

pub use animation::anim::{Animatable, Keyframe, Lerp};
pub use animation::ease::Ease;
pub use animation::time::TimeMapping;

pub use model::composition::{Asset, Composition};
pub use model::layer::{
    BlendMode, Effect, Layer, LayerKind, Mask, MaskMode, MatteType, Transform,
};
pub use model::shape::{
    Gradient, GradientKind, GradientStop, GradientStops, PathGeometry, PathVertex, ShapeItem,
};

pub use context::brush::{Brush, Fill, GradientBrush, Stroke};
pub use context::node::{
    ContextKind, EffectContext, MaskShape, Metadata, PathDirection, RenderingContext,
};
pub use context::opacity::CompositeOpacity;
pub use context::value::ContextValue;
pub use context::visibility::VisibilityWindow;

pub use rendering::content::{
    ImageContent, RenderingContent, ShapeContent, ShapeGeometry, SolidContent, TrimPath,
};
pub use rendering::pair::Rendering;

pub use eval::resolve::{ResolvedBrush, ResolvedClip, ResolvedContext, ResolvedPaint, resolve};
pub use optimize::{OptimizeOpts, optimize};

pub use grouping::groups::{
    RenderingGroup, RenderingWithVisibility, VisibilityGraph, group_by_visibility,
};
pub use grouping::segments::{TimeSegment, visibility_segments};

pub use session::issues::{IssueCode, IssueLog, TranslationIssue};
pub use session::translation_session::{
    TranslateOpts, Translation, TranslationSession, translate, translate_many,
};
