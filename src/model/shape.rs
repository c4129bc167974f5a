use crate::animation::anim::{Animatable, Lerp};
use crate::foundation::core::{BezPath, Color, Point, Vec2};
use crate::model::layer::Transform;
use serde::{Deserialize, Serialize};

/// Items inside a shape layer, in Lottie order (first item is topmost).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeItem {
    /// Nested items under their own transform.
    Group {
        /// Display name.
        #[serde(default)]
        name: String,
        /// Children, top first.
        items: Vec<ShapeItem>,
        /// Group transform; its opacity applies to every child.
        #[serde(default)]
        transform: Transform,
    },
    /// Free-form bezier outline.
    Path {
        /// Outline.
        path: Animatable<PathGeometry>,
        /// Drawn in reverse winding.
        #[serde(default)]
        reversed: bool,
    },
    /// Rectangle centered on `position`.
    Rectangle {
        /// Center.
        position: Animatable<Vec2>,
        /// Width and height.
        size: Animatable<Vec2>,
        /// Corner radius.
        #[serde(default = "zero")]
        roundness: Animatable<f64>,
        /// Drawn in reverse winding.
        #[serde(default)]
        reversed: bool,
    },
    /// Ellipse centered on `position`.
    Ellipse {
        /// Center.
        position: Animatable<Vec2>,
        /// Diameters.
        size: Animatable<Vec2>,
        /// Drawn in reverse winding.
        #[serde(default)]
        reversed: bool,
    },
    /// Solid fill for the geometry listed before it.
    Fill {
        /// Fill color.
        color: Animatable<Color>,
        /// Percent.
        #[serde(default = "hundred")]
        opacity: Animatable<f64>,
    },
    /// Solid stroke for the geometry listed before it.
    Stroke {
        /// Stroke color.
        color: Animatable<Color>,
        /// Percent.
        #[serde(default = "hundred")]
        opacity: Animatable<f64>,
        /// Line width.
        width: Animatable<f64>,
    },
    /// Gradient fill for the geometry listed before it.
    GradientFill {
        /// Gradient paint.
        gradient: Gradient,
        /// Percent.
        #[serde(default = "hundred")]
        opacity: Animatable<f64>,
    },
    /// Gradient stroke for the geometry listed before it.
    GradientStroke {
        /// Gradient paint.
        gradient: Gradient,
        /// Percent.
        #[serde(default = "hundred")]
        opacity: Animatable<f64>,
        /// Line width.
        width: Animatable<f64>,
    },
    /// Trims the geometry listed before it to a sub-range of its length.
    TrimPath {
        /// Percent of the length where drawing starts.
        #[serde(default = "zero")]
        start: Animatable<f64>,
        /// Percent of the length where drawing ends.
        #[serde(default = "hundred")]
        end: Animatable<f64>,
        /// Degrees the range is rotated along the path.
        #[serde(default = "zero")]
        offset: Animatable<f64>,
    },
    /// Star or polygon; reported and skipped.
    Polystar {
        /// Display name.
        #[serde(default)]
        name: String,
    },
    /// Repeater; reported and skipped.
    Repeater {
        /// Display name.
        #[serde(default)]
        name: String,
    },
    /// Merge paths; reported and skipped.
    MergePaths {
        /// Display name.
        #[serde(default)]
        name: String,
    },
}

fn zero() -> Animatable<f64> {
    Animatable::constant(0.0)
}

fn hundred() -> Animatable<f64> {
    Animatable::constant(100.0)
}

/// Gradient geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientKind {
    /// Along the line from start to end.
    Linear,
    /// Outward from start, reaching the last stop at end.
    Radial,
}

/// Gradient paint of a shape fill or stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    /// Linear or radial.
    pub kind: GradientKind,
    /// Where the first stop sits.
    pub start_point: Animatable<Vec2>,
    /// Where the last stop sits.
    pub end_point: Animatable<Vec2>,
    /// Radial focal offset, percent of the radius.
    #[serde(default = "zero")]
    pub highlight_length: Animatable<f64>,
    /// Radial focal direction, degrees.
    #[serde(default = "zero")]
    pub highlight_angle: Animatable<f64>,
    /// Color stops.
    pub stops: Animatable<GradientStops>,
}

/// One color stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f64,
    /// Color at `offset`.
    pub color: Color,
}

/// Stops in offset order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GradientStops(pub Vec<GradientStop>);

impl Lerp for GradientStops {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Stop lists with different lengths cannot be blended; hold the start value.
        if a.0.len() != b.0.len() {
            return a.clone();
        }
        Self(
            a.0.iter()
                .zip(&b.0)
                .map(|(x, y)| GradientStop {
                    offset: <f64 as Lerp>::lerp(&x.offset, &y.offset, t),
                    color: <Color as Lerp>::lerp(&x.color, &y.color, t),
                })
                .collect(),
        )
    }
}

/// One cubic vertex with tangents relative to `point`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    /// Vertex position.
    pub point: Vec2,
    /// Incoming control point, relative to `point`.
    #[serde(default)]
    pub in_tangent: Vec2,
    /// Outgoing control point, relative to `point`.
    #[serde(default)]
    pub out_tangent: Vec2,
}

/// A single bezier contour.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathGeometry {
    /// Vertices in drawing order.
    pub vertices: Vec<PathVertex>,
    /// Whether the last vertex joins back to the first.
    #[serde(default)]
    pub closed: bool,
}

impl PathGeometry {
    /// Number of cubic segments the path draws.
    pub fn segment_count(&self) -> usize {
        match self.vertices.len() {
            0 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }

    /// The contour as a kurbo path.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let Some(first) = self.vertices.first() else {
            return path;
        };
        path.move_to(first.point.to_point());
        let n = self.vertices.len();
        for i in 0..self.segment_count() {
            let a = &self.vertices[i];
            let b = &self.vertices[(i + 1) % n];
            path.curve_to(
                Point::ZERO + a.point + a.out_tangent,
                Point::ZERO + b.point + b.in_tangent,
                b.point.to_point(),
            );
        }
        if self.closed {
            path.close_path();
        }
        path
    }
}

impl Lerp for PathGeometry {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        if a.vertices.len() != b.vertices.len() || a.closed != b.closed {
            return a.clone();
        }
        Self {
            vertices: a
                .vertices
                .iter()
                .zip(&b.vertices)
                .map(|(x, y)| PathVertex {
                    point: <Vec2 as Lerp>::lerp(&x.point, &y.point, t),
                    in_tangent: <Vec2 as Lerp>::lerp(&x.in_tangent, &y.in_tangent, t),
                    out_tangent: <Vec2 as Lerp>::lerp(&x.out_tangent, &y.out_tangent, t),
                })
                .collect(),
            closed: a.closed,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/shape.rs"]
mod tests;
