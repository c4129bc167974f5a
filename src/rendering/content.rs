use crate::animation::time::TimeMapping;
use crate::context::brush::Brush;
use crate::context::value::ContextValue;
use crate::foundation::core::{Size, Vec2};
use crate::model::shape::PathGeometry;
use std::sync::Arc;

/// Drawable payload of one rendering, independent of how it is positioned or styled.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderingContent {
    /// A bitmap.
    Image(ImageContent),
    /// A filled rectangle.
    Solid(SolidContent),
    /// One piece of shape geometry.
    Shape(ShapeContent),
    /// Content this pipeline cannot express; kept so it is never silently dropped.
    Unsupported(String),
}

/// Image placed at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContent {
    /// Id of the image asset.
    pub asset_id: String,
    /// Location of the image file.
    pub path: String,
    /// Pixel size.
    pub size: Size,
}

/// Rectangle `[0, w] x [0, h]` painted with one brush.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidContent {
    /// Paint source.
    pub brush: Arc<Brush>,
    /// Rectangle size.
    pub size: Size,
}

/// Geometry drawn with the paint in its context.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeContent {
    /// Outline.
    pub geometry: ShapeGeometry,
    /// Trim applied to the outline.
    pub trim: Option<TrimPath>,
}

/// Outline of shape content.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeGeometry {
    /// Free-form bezier contour.
    Path(ContextValue<PathGeometry>),
    /// Rectangle centered on `position`.
    Rectangle {
        /// Center.
        position: ContextValue<Vec2>,
        /// Width and height.
        size: ContextValue<Vec2>,
        /// Corner radius.
        roundness: ContextValue<f64>,
    },
    /// Ellipse centered on `position`.
    Ellipse {
        /// Center.
        position: ContextValue<Vec2>,
        /// Diameters.
        size: ContextValue<Vec2>,
    },
}

/// Trim range in percent of path length, plus a rotation offset in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimPath {
    /// Where drawing starts.
    pub start: ContextValue<f64>,
    /// Where drawing ends.
    pub end: ContextValue<f64>,
    /// Rotation of the range along the path.
    pub offset: ContextValue<f64>,
}

impl RenderingContent {
    /// Bezier segment count for path geometry, `None` for anything else.
    ///
    /// An animated path reports the count of its initial value; keyframes on one path share a
    /// topology.
    pub fn path_segment_count(&self) -> Option<usize> {
        match self {
            Self::Shape(ShapeContent {
                geometry: ShapeGeometry::Path(path),
                ..
            }) => Some(path.initial().segment_count()),
            _ => None,
        }
    }

    /// Whether any payload is keyframed.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::Image(_) | Self::Unsupported(_) => false,
            Self::Solid(s) => s.brush.is_animated(),
            Self::Shape(s) => s.geometry.is_animated() || s.trim.as_ref().is_some_and(TrimPath::is_animated),
        }
    }

    /// Re-express keyframes in the parent timeline of `mapping`.
    pub fn remap_time(&self, mapping: TimeMapping) -> Self {
        if mapping.is_identity() {
            return self.clone();
        }
        match self {
            Self::Image(_) | Self::Unsupported(_) => self.clone(),
            Self::Solid(s) => Self::Solid(SolidContent {
                brush: Arc::new(s.brush.remap_time(mapping)),
                size: s.size,
            }),
            Self::Shape(s) => Self::Shape(ShapeContent {
                geometry: s.geometry.remap_time(mapping),
                trim: s.trim.as_ref().map(|t| t.remap_time(mapping)),
            }),
        }
    }
}

impl ShapeGeometry {
    /// Whether any parameter is keyframed.
    pub fn is_animated(&self) -> bool {
        match self {
            Self::Path(p) => p.is_animated(),
            Self::Rectangle {
                position,
                size,
                roundness,
            } => position.is_animated() || size.is_animated() || roundness.is_animated(),
            Self::Ellipse { position, size } => position.is_animated() || size.is_animated(),
        }
    }

    fn remap_time(&self, mapping: TimeMapping) -> Self {
        match self {
            Self::Path(p) => Self::Path(p.remap_time(mapping)),
            Self::Rectangle {
                position,
                size,
                roundness,
            } => Self::Rectangle {
                position: position.remap_time(mapping),
                size: size.remap_time(mapping),
                roundness: roundness.remap_time(mapping),
            },
            Self::Ellipse { position, size } => Self::Ellipse {
                position: position.remap_time(mapping),
                size: size.remap_time(mapping),
            },
        }
    }
}

impl TrimPath {
    /// Whether any parameter is keyframed.
    pub fn is_animated(&self) -> bool {
        self.start.is_animated() || self.end.is_animated() || self.offset.is_animated()
    }

    fn remap_time(&self, mapping: TimeMapping) -> Self {
        Self {
            start: self.start.remap_time(mapping),
            end: self.end.remap_time(mapping),
            offset: self.offset.remap_time(mapping),
        }
    }
}
