//! Flatten the layer tree into `(content, context)` pairs.
//!
//! Layers are walked bottom to top, so the output is in paint order. Parent transforms and
//! precomp wrappers are folded into each pair's context; nothing in the result refers back to the
//! tree.

pub(crate) mod layers;
pub(crate) mod shapes;

use crate::context::node::RenderingContext;
use crate::detreeify::layers::LayerContextBuilder;
use crate::foundation::core::Size;
use crate::foundation::error::IrResult;
use crate::model::composition::{Asset, Composition};
use crate::model::layer::{Layer, LayerKind};
use crate::rendering::content::{ImageContent, RenderingContent, SolidContent};
use crate::rendering::pair::Rendering;
use crate::session::issues::IssueCode;
use crate::session::translation_session::TranslationSession;

#[tracing::instrument(skip(comp, session), fields(layers = comp.layers.len()))]
pub(crate) fn detreeify(
    comp: &Composition,
    session: &mut TranslationSession,
) -> IrResult<Vec<Rendering>> {
    let mut precomp_stack = Vec::new();
    let renderings = walk_layers(comp, &comp.layers, session, &mut precomp_stack)?;
    let clip = RenderingContext::Clip(Size::new(comp.width, comp.height));
    let out: Vec<Rendering> = renderings
        .iter()
        .map(|r| r.wrapped_in(clip.clone()))
        .collect();
    tracing::debug!(renderings = out.len(), "detreeified");
    Ok(out)
}

fn walk_layers<'a>(
    comp: &'a Composition,
    layers: &'a [Layer],
    session: &mut TranslationSession,
    precomp_stack: &mut Vec<&'a str>,
) -> IrResult<Vec<Rendering>> {
    let builder = LayerContextBuilder::new(layers);
    let mut out = Vec::new();

    for layer in layers.iter().rev() {
        match &layer.kind {
            LayerKind::Null => {}
            LayerKind::PreComp {
                ref_id,
                width,
                height,
            } => {
                let inner_layers = match comp.asset(ref_id) {
                    Some(Asset::Precomp { layers, .. }) => layers,
                    Some(Asset::Image { .. }) => {
                        session.report(
                            IssueCode::InvalidAssetReference,
                            format!(
                                "precomp layer \"{}\" references image asset \"{ref_id}\"",
                                layer.name
                            ),
                        )?;
                        continue;
                    }
                    None => {
                        session.report(
                            IssueCode::MissingAsset,
                            format!(
                                "precomp layer \"{}\" references missing asset \"{ref_id}\"",
                                layer.name
                            ),
                        )?;
                        continue;
                    }
                };
                if precomp_stack.contains(&ref_id.as_str()) {
                    session.report(
                        IssueCode::InvalidAssetReference,
                        format!("precomp \"{ref_id}\" includes itself"),
                    )?;
                    continue;
                }

                let ctx = builder.build(layer, session)?;
                precomp_stack.push(ref_id.as_str());
                let inner = walk_layers(comp, inner_layers, session, precomp_stack)?;
                precomp_stack.pop();

                let outer =
                    RenderingContext::compose([ctx, RenderingContext::Clip(Size::new(*width, *height))]);
                out.extend(inner.iter().map(|r| r.wrapped_in(outer.clone())));
            }
            LayerKind::Image { ref_id } => {
                let content = match comp.asset(ref_id) {
                    Some(Asset::Image {
                        id,
                        width,
                        height,
                        path,
                    }) => ImageContent {
                        asset_id: id.clone(),
                        path: path.clone(),
                        size: Size::new(*width, *height),
                    },
                    Some(Asset::Precomp { .. }) => {
                        session.report(
                            IssueCode::InvalidAssetReference,
                            format!(
                                "image layer \"{}\" references precomp asset \"{ref_id}\"",
                                layer.name
                            ),
                        )?;
                        continue;
                    }
                    None => {
                        session.report(
                            IssueCode::MissingAsset,
                            format!(
                                "image layer \"{}\" references missing asset \"{ref_id}\"",
                                layer.name
                            ),
                        )?;
                        continue;
                    }
                };
                let ctx = builder.build(layer, session)?;
                out.push(Rendering::new(RenderingContent::Image(content), ctx));
            }
            LayerKind::Solid {
                color,
                width,
                height,
            } => {
                let ctx = builder.build(layer, session)?;
                let content = SolidContent {
                    brush: session.brushes().solid(*color),
                    size: Size::new(*width, *height),
                };
                out.push(Rendering::new(RenderingContent::Solid(content), ctx));
            }
            LayerKind::Text { .. } => {
                session.report(
                    IssueCode::TextLayer,
                    format!("text layer \"{}\" is not supported", layer.name),
                )?;
                let ctx = builder.build(layer, session)?;
                out.push(Rendering::new(
                    RenderingContent::Unsupported("text".to_owned()),
                    ctx,
                ));
            }
            LayerKind::Shape { shapes } => {
                let ctx = builder.build(layer, session)?;
                let inner = shapes::shape_renderings(shapes, session)?;
                out.extend(inner.iter().map(|r| r.wrapped_in(ctx.clone())));
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/detreeify/detreeify.rs"]
mod tests;
