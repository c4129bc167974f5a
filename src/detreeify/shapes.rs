use crate::context::brush::{Brush, Fill, GradientBrush, Stroke};
use crate::context::node::{PathDirection, RenderingContext};
use crate::context::value::ContextValue;
use crate::detreeify::layers::{opacity_fraction, transform_chain};
use crate::foundation::error::IrResult;
use crate::model::layer::Transform;
use crate::model::shape::{Gradient, GradientKind, ShapeItem};
use crate::rendering::content::{RenderingContent, ShapeContent, ShapeGeometry, TrimPath};
use crate::rendering::pair::Rendering;
use crate::session::issues::IssueCode;
use crate::session::translation_session::TranslationSession;
use std::sync::Arc;

/// Paint and trim in effect for the next geometry of a group.
#[derive(Debug, Clone, Default)]
struct ShapeStyle {
    fill: Option<Fill>,
    stroke: Option<Stroke>,
    trim: Option<TrimPath>,
}

/// Renderings for the items of a shape layer, bottom first. Contexts are relative to the layer.
pub(crate) fn shape_renderings(
    items: &[ShapeItem],
    session: &mut TranslationSession,
) -> IrResult<Vec<Rendering>> {
    let mut out = Vec::new();
    walk_group(items, &ShapeStyle::default(), session, &mut out)?;
    Ok(out)
}

fn walk_group(
    items: &[ShapeItem],
    inherited: &ShapeStyle,
    session: &mut TranslationSession,
    out: &mut Vec<Rendering>,
) -> IrResult<()> {
    report_duplicate_paints(items, session)?;
    let mut style = inherited.clone();

    // Items are listed top first. A paint applies to the geometry listed before it, and the
    // nearest one wins.
    for item in items.iter().rev() {
        match item {
            ShapeItem::Group {
                items: children,
                transform,
                ..
            } => {
                let mut inner = Vec::new();
                walk_group(children, &style, session, &mut inner)?;
                let ctx = group_context(transform);
                out.extend(inner.iter().map(|r| r.wrapped_in(ctx.clone())));
            }
            ShapeItem::Path { path, reversed } => emit_geometry(
                ShapeGeometry::Path(ContextValue::from_animatable(path)),
                *reversed,
                &style,
                out,
            ),
            ShapeItem::Rectangle {
                position,
                size,
                roundness,
                reversed,
            } => emit_geometry(
                ShapeGeometry::Rectangle {
                    position: ContextValue::from_animatable(position),
                    size: ContextValue::from_animatable(size),
                    roundness: ContextValue::from_animatable(roundness),
                },
                *reversed,
                &style,
                out,
            ),
            ShapeItem::Ellipse {
                position,
                size,
                reversed,
            } => emit_geometry(
                ShapeGeometry::Ellipse {
                    position: ContextValue::from_animatable(position),
                    size: ContextValue::from_animatable(size),
                },
                *reversed,
                &style,
                out,
            ),
            ShapeItem::Polystar { name } => {
                session.report(IssueCode::Polystar, format!("polystar \"{name}\" ignored"))?;
            }
            ShapeItem::Repeater { name } => {
                session.report(IssueCode::Repeater, format!("repeater \"{name}\" ignored"))?;
            }
            ShapeItem::MergePaths { name } => {
                session.report(
                    IssueCode::MergePaths,
                    format!("merge paths \"{name}\" ignored"),
                )?;
            }
            ShapeItem::Fill { color, opacity } => {
                style.fill = Some(Fill {
                    brush: session
                        .brushes()
                        .brush_for(ContextValue::from_animatable(color)),
                    opacity: opacity_fraction(opacity),
                });
            }
            ShapeItem::GradientFill { gradient, opacity } => {
                style.fill = Some(Fill {
                    brush: gradient_brush(gradient, session)?,
                    opacity: opacity_fraction(opacity),
                });
            }
            ShapeItem::Stroke {
                color,
                opacity,
                width,
            } => {
                style.stroke = Some(Stroke {
                    brush: session
                        .brushes()
                        .brush_for(ContextValue::from_animatable(color)),
                    opacity: opacity_fraction(opacity),
                    width: ContextValue::from_animatable(width),
                });
            }
            ShapeItem::GradientStroke {
                gradient,
                opacity,
                width,
            } => {
                style.stroke = Some(Stroke {
                    brush: gradient_brush(gradient, session)?,
                    opacity: opacity_fraction(opacity),
                    width: ContextValue::from_animatable(width),
                });
            }
            ShapeItem::TrimPath { start, end, offset } => {
                style.trim = Some(TrimPath {
                    start: ContextValue::from_animatable(start),
                    end: ContextValue::from_animatable(end),
                    offset: ContextValue::from_animatable(offset),
                });
            }
        }
    }
    Ok(())
}

/// Reports every fill, stroke or trim declared after the first of its kind in one group.
fn report_duplicate_paints(items: &[ShapeItem], session: &mut TranslationSession) -> IrResult<()> {
    let (mut fills, mut strokes, mut trims) = (0usize, 0usize, 0usize);
    for item in items {
        let (count, code, what) = match item {
            ShapeItem::Fill { .. } | ShapeItem::GradientFill { .. } => {
                (&mut fills, IssueCode::MultipleFills, "fill")
            }
            ShapeItem::Stroke { .. } | ShapeItem::GradientStroke { .. } => {
                (&mut strokes, IssueCode::MultipleStrokes, "stroke")
            }
            ShapeItem::TrimPath { .. } => (&mut trims, IssueCode::MultipleTrimPaths, "trim path"),
            _ => continue,
        };
        *count += 1;
        if *count > 1 {
            session.report(code, format!("shape group has more than one {what}"))?;
        }
    }
    Ok(())
}

fn gradient_brush(
    gradient: &Gradient,
    session: &mut TranslationSession,
) -> IrResult<Arc<Brush>> {
    let mut end = ContextValue::from_animatable(&gradient.end_point);
    if gradient.kind == GradientKind::Radial
        && (gradient.end_point.is_animated()
            || gradient.highlight_length.is_animated()
            || gradient.highlight_angle.is_animated())
    {
        session.report(
            IssueCode::GradientUnsupported,
            "animated radial gradient end point or highlight; using the initial value",
        )?;
        end = ContextValue::Static(*gradient.end_point.initial());
    }
    Ok(Arc::new(Brush::Gradient(GradientBrush {
        kind: gradient.kind,
        start: ContextValue::from_animatable(&gradient.start_point),
        end,
        highlight_length: *gradient.highlight_length.initial(),
        highlight_angle: *gradient.highlight_angle.initial(),
        stops: ContextValue::from_animatable(&gradient.stops),
    })))
}

/// `[Opacity, Anchor, Position, Rotation, Scale]` of a shape group, identities omitted.
fn group_context(transform: &Transform) -> RenderingContext {
    let opacity = opacity_fraction(&transform.opacity);
    let mut nodes = Vec::with_capacity(5);
    if !opacity.is_static_value(&1.0) {
        nodes.push(RenderingContext::Opacity(opacity));
    }
    nodes.extend(transform_chain(transform));
    RenderingContext::compose(nodes)
}

/// Fill rendering first, stroke rendering above it. Geometry with no paint in scope draws nothing.
fn emit_geometry(
    geometry: ShapeGeometry,
    reversed: bool,
    style: &ShapeStyle,
    out: &mut Vec<Rendering>,
) {
    let direction = if reversed {
        RenderingContext::DrawingDirection(PathDirection::Reversed)
    } else {
        RenderingContext::Null
    };
    let content = RenderingContent::Shape(ShapeContent {
        geometry,
        trim: style.trim.clone(),
    });
    if let Some(fill) = &style.fill {
        out.push(Rendering::new(
            content.clone(),
            RenderingContext::compose([RenderingContext::Fill(fill.clone()), direction.clone()]),
        ));
    }
    if let Some(stroke) = &style.stroke {
        out.push(Rendering::new(
            content,
            RenderingContext::compose([RenderingContext::Stroke(stroke.clone()), direction]),
        ));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detreeify/shapes.rs"]
mod tests;
