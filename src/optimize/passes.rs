use crate::context::node::{ContextKind, RenderingContext};
use crate::context::value::ContextValue;
use crate::context::visibility::VisibilityWindow;
use crate::foundation::core::{IDENTITY_SCALE, Size, Vec2};
use crate::foundation::error::{IrError, IrResult};
use crate::model::layer::BlendMode;
use std::sync::Arc;

/// Rewrite every `Anchor` into plain positions that bracket the rotations and scales it pivots.
///
/// A static anchor `a` becomes `Position(-a)`, and each rotation or scale in its scope becomes
/// `[Position(a), node, Position(-a)]`. An animated anchor becomes an animated inverse position,
/// and each scoped rotation or scale is wrapped as `[CenterPoint(a), node, CenterPoint(0)]`. The
/// scope of an anchor ends at the next anchor or center point.
pub(crate) fn replace_anchors(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    if !ctx.contains(ContextKind::Anchor) {
        return Ok(ctx.clone());
    }

    let mut out = Vec::with_capacity(ctx.len() + 4);
    let mut scope: Option<ContextValue<Vec2>> = None;
    // Whether the emitted run may have left a non-zero pivot behind.
    let mut pivot_dirty = false;

    for node in ctx.children() {
        match node {
            RenderingContext::Anchor(a) => {
                if !a.is_static_value(&Vec2::ZERO) {
                    out.push(RenderingContext::Position(a.map(|v| -*v)));
                }
                if pivot_dirty {
                    out.push(RenderingContext::CenterPoint(ContextValue::Static(Vec2::ZERO)));
                    pivot_dirty = false;
                }
                scope = Some(a.clone());
            }
            RenderingContext::CenterPoint(c) => {
                scope = None;
                pivot_dirty = !c.is_static_value(&Vec2::ZERO);
                out.push(node.clone());
            }
            RenderingContext::Rotation(_) | RenderingContext::Scale(_) => match &scope {
                Some(ContextValue::Static(a)) if *a != Vec2::ZERO => {
                    out.push(RenderingContext::Position(ContextValue::Static(*a)));
                    out.push(node.clone());
                    out.push(RenderingContext::Position(ContextValue::Static(-*a)));
                }
                Some(anim @ ContextValue::Animated(_)) => {
                    out.push(RenderingContext::CenterPoint(anim.clone()));
                    out.push(node.clone());
                    out.push(RenderingContext::CenterPoint(ContextValue::Static(Vec2::ZERO)));
                }
                _ => out.push(node.clone()),
            },
            other => out.push(other.clone()),
        }
    }

    Ok(RenderingContext::from_flat(out))
}

/// Keep only the last blend mode, moved to the end, and drop it if it is `Normal`.
pub(crate) fn dedupe_blend_modes(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    let last = ctx.children().iter().rev().find_map(|c| match c {
        RenderingContext::BlendMode(b) => Some(*b),
        _ => None,
    });
    let Some(last) = last else {
        return Ok(ctx.clone());
    };
    let rest = ctx.without(ContextKind::BlendMode);
    Ok(if last == BlendMode::Normal {
        rest
    } else {
        rest + RenderingContext::BlendMode(last)
    })
}

/// Multiply runs of opacities. Static factors fold into the first animated opacity of the run;
/// animated opacities are never fused with each other. A product of exactly 1 disappears.
pub(crate) fn fuse_opacities(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    let grouped = ctx.group_up(ContextKind::Opacity);
    Ok(combine_runs(&grouped, ContextKind::Opacity, |run| {
        let mut product = 1.0;
        for node in run {
            if let RenderingContext::Opacity(ContextValue::Static(o)) = node {
                product *= o;
            }
        }

        let mut out = Vec::with_capacity(run.len());
        let mut folded = false;
        for node in run {
            if let RenderingContext::Opacity(v @ ContextValue::Animated(_)) = node {
                if !folded && product != 1.0 {
                    out.push(RenderingContext::Opacity(v.map(|o| o * product)));
                } else {
                    out.push(node.clone());
                }
                folded = true;
            }
        }
        if !folded && product != 1.0 {
            out.push(RenderingContext::Opacity(ContextValue::Static(product)));
        }
        out
    }))
}

/// Sum runs of static positions; fold the running sum into the next animated position.
pub(crate) fn fuse_positions(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    ensure_no_anchors(ctx, "position")?;
    let grouped = ctx.group_up(ContextKind::Position);
    Ok(combine_runs(&grouped, ContextKind::Position, |run| {
        accumulate(
            run,
            |n| match n {
                RenderingContext::Position(v) => Some(v),
                _ => None,
            },
            Vec2::ZERO,
            |a, b| a + b,
            RenderingContext::Position,
        )
    }))
}

/// Add runs of static rotations (degrees, unbounded); fold into the next animated rotation.
pub(crate) fn fuse_rotations(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    ensure_no_anchors(ctx, "rotation")?;
    let grouped = ctx.group_up(ContextKind::Rotation);
    Ok(combine_runs(&grouped, ContextKind::Rotation, |run| {
        accumulate(
            run,
            |n| match n {
                RenderingContext::Rotation(v) => Some(v),
                _ => None,
            },
            0.0,
            |a, b| a + b,
            RenderingContext::Rotation,
        )
    }))
}

/// Multiply runs of static scales (percent per axis); fold into the next animated scale.
pub(crate) fn fuse_scales(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    ensure_no_anchors(ctx, "scale")?;
    let grouped = ctx.group_up(ContextKind::Scale);
    Ok(combine_runs(&grouped, ContextKind::Scale, |run| {
        accumulate(
            run,
            |n| match n {
                RenderingContext::Scale(v) => Some(v),
                _ => None,
            },
            IDENTITY_SCALE,
            |a, b| Vec2::new(a.x * b.x / 100.0, a.y * b.y / 100.0),
            RenderingContext::Scale,
        )
    }))
}

/// Drop `Size` nodes that cannot shrink the region already bounded by outer clips.
pub(crate) fn tighten_sizes(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    if !ctx.contains(ContextKind::Size) || ctx.contains(ContextKind::Anchor) {
        return Ok(ctx.clone());
    }

    let mut bound = Bound::UNBOUNDED;
    let mut pivot = Some(Vec2::ZERO);
    let mut out = Vec::with_capacity(ctx.len());

    for node in ctx.children() {
        match node {
            RenderingContext::Position(ContextValue::Static(p)) => bound = bound.translated(-*p),
            RenderingContext::Scale(ContextValue::Static(s)) => {
                bound = match pivot {
                    Some(c) if s.x != 0.0 && s.y != 0.0 => bound.unscaled(c, *s / 100.0),
                    _ => Bound::UNBOUNDED,
                };
            }
            RenderingContext::CenterPoint(ContextValue::Static(c)) => pivot = Some(*c),
            RenderingContext::CenterPoint(ContextValue::Animated(_)) => pivot = None,
            RenderingContext::Position(ContextValue::Animated(_))
            | RenderingContext::Scale(ContextValue::Animated(_))
            | RenderingContext::Rotation(_)
            | RenderingContext::Effect(_)
            | RenderingContext::Unsupported(_) => bound = Bound::UNBOUNDED,
            RenderingContext::Clip(size) => bound = bound.intersect(*size),
            RenderingContext::Size(size) => {
                if bound.fits_in(*size) {
                    continue;
                }
                bound = bound.intersect(*size);
            }
            _ => {}
        }
        out.push(node.clone());
    }

    Ok(RenderingContext::from_flat(out))
}

/// `[Fill|Stroke(gradient g), Position(p)]` becomes `[Position(p), Fill|Stroke(g - p)]`, letting the
/// position climb past the paint and fuse further out.
pub(crate) fn fuse_gradient_positions(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    let mut nodes = ctx.children().to_vec();
    let mut i = 0;
    while i + 1 < nodes.len() {
        if let RenderingContext::Position(ContextValue::Static(p)) = &nodes[i + 1]
            && nodes[i].is_gradient_paint()
        {
            let p = *p;
            let moved = match &nodes[i] {
                RenderingContext::Fill(f) => RenderingContext::Fill(f.with_brush_offset(-p)),
                RenderingContext::Stroke(s) => RenderingContext::Stroke(s.with_brush_offset(-p)),
                other => {
                    return Err(IrError::internal(format!(
                        "gradient paint expected, found {:?}",
                        other.kind()
                    )));
                }
            };
            nodes[i] = RenderingContext::Position(ContextValue::Static(p));
            nodes[i + 1] = moved;
        }
        i += 1;
    }
    Ok(RenderingContext::from_flat(nodes))
}

/// AND together runs of visibility windows. An always-visible result disappears.
pub(crate) fn fuse_visibilities(ctx: &RenderingContext) -> IrResult<RenderingContext> {
    let grouped = ctx.group_up(ContextKind::Visibility);
    Ok(combine_runs(&grouped, ContextKind::Visibility, |run| {
        let windows: Vec<VisibilityWindow> = run
            .iter()
            .filter_map(|n| match n {
                RenderingContext::Visibility(w) => Some(w.clone()),
                _ => None,
            })
            .collect();
        let combined = if windows.len() == 1 {
            windows[0].clone()
        } else {
            VisibilityWindow::combine_and(&windows)
        };
        if combined.is_always_visible() {
            Vec::new()
        } else {
            vec![RenderingContext::Visibility(combined)]
        }
    }))
}

fn ensure_no_anchors(ctx: &RenderingContext, pass: &str) -> IrResult<()> {
    if ctx.contains(ContextKind::Anchor) {
        return Err(IrError::internal(format!(
            "anchor still present when fusing {pass}"
        )));
    }
    Ok(())
}

/// Replace each maximal run of adjacent `kind` nodes with `f(run)`.
fn combine_runs(
    ctx: &RenderingContext,
    kind: ContextKind,
    f: impl Fn(&[RenderingContext]) -> Vec<RenderingContext>,
) -> RenderingContext {
    let nodes = ctx.children();
    let mut out = Vec::with_capacity(nodes.len());
    let mut i = 0;
    while i < nodes.len() {
        if !nodes[i].is(kind) {
            out.push(nodes[i].clone());
            i += 1;
            continue;
        }
        let start = i;
        while i < nodes.len() && nodes[i].is(kind) {
            i += 1;
        }
        out.extend(f(&nodes[start..i]));
    }
    RenderingContext::from_flat(out)
}

/// Shared static/animated accumulation for commutative transform kinds.
fn accumulate<T: Clone + PartialEq>(
    run: &[RenderingContext],
    value_of: impl Fn(&RenderingContext) -> Option<&ContextValue<T>>,
    identity: T,
    combine: impl Fn(T, T) -> T,
    wrap: impl Fn(ContextValue<T>) -> RenderingContext,
) -> Vec<RenderingContext> {
    let mut out = Vec::with_capacity(run.len());
    let mut acc: Option<T> = None;
    for node in run {
        match value_of(node) {
            Some(ContextValue::Static(v)) => {
                acc = Some(match acc.take() {
                    Some(a) => combine(a, v.clone()),
                    None => v.clone(),
                });
            }
            Some(ContextValue::Animated(anim)) => {
                let value = match acc.take() {
                    Some(a) if a != identity => ContextValue::Animated(Arc::new(
                        anim.map_values(|k| combine(a.clone(), k.clone())),
                    )),
                    _ => ContextValue::Animated(anim.clone()),
                };
                out.push(wrap(value));
            }
            None => out.push(node.clone()),
        }
    }
    if let Some(a) = acc
        && a != identity
    {
        out.push(wrap(ContextValue::Static(a)));
    }
    out
}

/// Axis-aligned region known to contain everything that survives the outer clips, in the current
/// frame.
#[derive(Debug, Clone, Copy)]
struct Bound {
    min: Vec2,
    max: Vec2,
}

impl Bound {
    const UNBOUNDED: Bound = Bound {
        min: Vec2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        max: Vec2::new(f64::INFINITY, f64::INFINITY),
    };

    fn translated(self, by: Vec2) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    /// Map the region through the inverse of a scale by `s` around `c`.
    fn unscaled(self, c: Vec2, s: Vec2) -> Self {
        let ax = c.x + (self.min.x - c.x) / s.x;
        let bx = c.x + (self.max.x - c.x) / s.x;
        let ay = c.y + (self.min.y - c.y) / s.y;
        let by = c.y + (self.max.y - c.y) / s.y;
        Self {
            min: Vec2::new(ax.min(bx), ay.min(by)),
            max: Vec2::new(ax.max(bx), ay.max(by)),
        }
    }

    fn intersect(self, size: Size) -> Self {
        Self {
            min: Vec2::new(self.min.x.max(0.0), self.min.y.max(0.0)),
            max: Vec2::new(self.max.x.min(size.width), self.max.y.min(size.height)),
        }
    }

    fn fits_in(self, size: Size) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.max.x <= size.width
            && self.max.y <= size.height
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optimize/passes.rs"]
mod tests;
