use crate::animation::time::TimeMapping;
use crate::context::brush::Brush;
use crate::context::node::{PathDirection, RenderingContext};
use crate::context::opacity::CompositeOpacity;
use crate::foundation::core::{Affine, Color, Point, Size, Vec2};
use crate::foundation::error::IrResult;
use crate::model::layer::{BlendMode, MatteType};
use crate::model::shape::{GradientKind, GradientStops};

/// A clip rectangle at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedClip {
    /// Frame in which `[0, w] x [0, h]` is measured.
    pub transform: Affine,
    /// Clip extent.
    pub size: Size,
}

/// A brush at one frame, with gradient endpoints in world space.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedBrush {
    /// One color.
    Solid(Color),
    /// Gradient.
    Gradient {
        /// Linear or radial.
        kind: GradientKind,
        /// World-space start point.
        start: Point,
        /// World-space end point.
        end: Point,
        /// Color stops.
        stops: GradientStops,
    },
}

/// A fill or stroke at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPaint {
    /// Paint source.
    pub brush: ResolvedBrush,
    /// Paint opacity, excluding the context opacity.
    pub opacity: f64,
    /// World-space stroke width; zero for fills.
    pub width: f64,
}

/// Everything a context contributes at one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    /// Content space to world space.
    pub transform: Affine,
    /// Product of every opacity node.
    pub opacity: f64,
    /// Whether every visibility window is open.
    pub visible: bool,
    /// Last blend mode seen.
    pub blend_mode: BlendMode,
    /// Last drawing direction seen.
    pub direction: PathDirection,
    /// Clips, outermost first.
    pub clips: Vec<ResolvedClip>,
    /// Fills, outermost first.
    pub fills: Vec<ResolvedPaint>,
    /// Strokes, outermost first.
    pub strokes: Vec<ResolvedPaint>,
    /// Frame each mask node was declared in.
    pub masks: Vec<Affine>,
    /// Matte kinds in order.
    pub mattes: Vec<MatteType>,
    /// Frame each effect node was declared in.
    pub effects: Vec<Affine>,
    /// Names of unsupported nodes.
    pub unsupported: Vec<String>,
}

impl ResolvedContext {
    /// Whether a world-space point survives every clip.
    pub fn contains(&self, world: Point) -> bool {
        self.clips.iter().all(|clip| {
            if clip.transform.determinant().abs() < 1e-12 {
                return false;
            }
            let p = clip.transform.inverse() * world;
            p.x >= 0.0 && p.y >= 0.0 && p.x <= clip.size.width && p.y <= clip.size.height
        })
    }

    /// Place a content-space point in the world.
    pub fn apply(&self, p: Point) -> Point {
        self.transform * p
    }
}

struct State {
    transform: Affine,
    pivot: Vec2,
    mapping: TimeMapping,
    opacity: CompositeOpacity,
    out: ResolvedContext,
}

impl State {
    fn local(&self, frame: f64) -> f64 {
        self.mapping.invert(frame)
    }

    fn about_pivot(&mut self, m: Affine) {
        let c = self.pivot;
        self.transform *= Affine::translate(c) * m * Affine::translate(-c);
    }

    fn resolve_brush(&self, brush: &Brush, local: f64) -> ResolvedBrush {
        match brush {
            Brush::Solid(c) => ResolvedBrush::Solid(c.sample(local)),
            Brush::Gradient(g) => ResolvedBrush::Gradient {
                kind: g.kind,
                start: self.transform * g.start.sample(local).to_point(),
                end: self.transform * g.end.sample(local).to_point(),
                stops: g.stops.sample(local),
            },
        }
    }
}

/// Sample `context` at `frame` of the outermost timeline.
pub fn resolve(context: &RenderingContext, frame: f64) -> IrResult<ResolvedContext> {
    let mut st = State {
        transform: Affine::IDENTITY,
        pivot: Vec2::ZERO,
        mapping: TimeMapping::IDENTITY,
        opacity: CompositeOpacity::opaque(),
        out: ResolvedContext {
            transform: Affine::IDENTITY,
            opacity: 1.0,
            visible: true,
            blend_mode: BlendMode::Normal,
            direction: PathDirection::Forward,
            clips: Vec::new(),
            fills: Vec::new(),
            strokes: Vec::new(),
            masks: Vec::new(),
            mattes: Vec::new(),
            effects: Vec::new(),
            unsupported: Vec::new(),
        },
    };

    for node in context.children() {
        let local = st.local(frame);
        match node {
            RenderingContext::Null | RenderingContext::Composite(_) | RenderingContext::Metadata(_) => {}
            RenderingContext::Position(p) => st.transform *= Affine::translate(p.sample(local)),
            RenderingContext::Anchor(a) => {
                let a = a.sample(local);
                st.transform *= Affine::translate(-a);
                st.pivot = a;
            }
            RenderingContext::CenterPoint(c) => st.pivot = c.sample(local),
            RenderingContext::Rotation(r) => {
                st.about_pivot(Affine::rotate(r.sample(local).to_radians()));
            }
            RenderingContext::Scale(s) => {
                let s = s.sample(local) / 100.0;
                st.about_pivot(Affine::scale_non_uniform(s.x, s.y));
            }
            RenderingContext::Opacity(o) => {
                st.opacity = st.opacity.compose(&o.remap_time(st.mapping));
            }
            RenderingContext::Visibility(w) => {
                st.out.visible &= w.remap_time(st.mapping).is_visible_at(frame);
            }
            RenderingContext::Clip(size) | RenderingContext::Size(size) => {
                st.out.clips.push(ResolvedClip {
                    transform: st.transform,
                    size: *size,
                });
            }
            RenderingContext::BlendMode(b) => st.out.blend_mode = *b,
            RenderingContext::DrawingDirection(d) => st.out.direction = *d,
            RenderingContext::Fill(f) => {
                let paint = ResolvedPaint {
                    brush: st.resolve_brush(&f.brush, local),
                    opacity: f.opacity.sample(local),
                    width: 0.0,
                };
                st.out.fills.push(paint);
            }
            RenderingContext::Stroke(s) => {
                let paint = ResolvedPaint {
                    brush: st.resolve_brush(&s.brush, local),
                    opacity: s.opacity.sample(local),
                    width: s.width.sample(local) * st.transform.determinant().abs().sqrt(),
                };
                st.out.strokes.push(paint);
            }
            RenderingContext::Mask(_) => st.out.masks.push(st.transform),
            RenderingContext::MatteType(m) => st.out.mattes.push(*m),
            RenderingContext::Effect(_) => st.out.effects.push(st.transform),
            RenderingContext::Unsupported(what) => st.out.unsupported.push(what.clone()),
            RenderingContext::TimeOffset(o) => st.mapping = st.mapping.then_offset(*o)?,
            RenderingContext::TimeStretch(s) => st.mapping = st.mapping.then_stretch(*s)?,
        }
    }

    st.out.transform = st.transform;
    st.out.opacity = st.opacity.sample(frame);
    Ok(st.out)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/resolve.rs"]
mod tests;
