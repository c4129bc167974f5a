use crate::animation::anim::Animatable;
use crate::context::node::{EffectContext, MaskShape, Metadata, RenderingContext};
use crate::context::value::ContextValue;
use crate::context::visibility::VisibilityWindow;
use crate::foundation::core::{IDENTITY_SCALE, Vec2};
use crate::foundation::error::IrResult;
use crate::model::layer::{BlendMode, Effect, Layer, Transform};
use crate::session::issues::IssueCode;
use crate::session::translation_session::TranslationSession;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Layer timing after sanitizing the stretch.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayerTiming {
    pub(crate) start_time: f64,
    pub(crate) stretch: f64,
}

impl LayerTiming {
    pub(crate) fn of(layer: &Layer) -> Self {
        let stretch = if layer.time_stretch > 0.0 {
            layer.time_stretch
        } else {
            1.0
        };
        Self {
            start_time: layer.start_time,
            stretch,
        }
    }
}

/// `[Anchor, Position, Rotation, Scale]`, each omitted when it is a static identity. A zero anchor
/// stays ahead of a rotation or scale to reset the pivot left by an outer transform.
pub(crate) fn transform_chain(t: &Transform) -> Vec<RenderingContext> {
    let anchor = ContextValue::from_animatable(&t.anchor);
    let position = ContextValue::from_animatable(&t.position);
    let rotation = ContextValue::from_animatable(&t.rotation);
    let scale = ContextValue::from_animatable(&t.scale);

    let rotates = !rotation.is_static_value(&0.0);
    let scales = !scale.is_static_value(&IDENTITY_SCALE);

    let mut out = Vec::with_capacity(4);
    if rotates || scales || !anchor.is_static_value(&Vec2::ZERO) {
        out.push(RenderingContext::Anchor(anchor));
    }
    if !position.is_static_value(&Vec2::ZERO) {
        out.push(RenderingContext::Position(position));
    }
    if rotates {
        out.push(RenderingContext::Rotation(rotation));
    }
    if scales {
        out.push(RenderingContext::Scale(scale));
    }
    out
}

/// Percent opacity track to a fraction.
pub(crate) fn opacity_fraction(percent: &Animatable<f64>) -> ContextValue<f64> {
    ContextValue::from_animatable(&percent.map_values(|v| v / 100.0))
}

pub(crate) struct LayerContextBuilder<'a> {
    by_index: HashMap<i64, &'a Layer>,
}

impl<'a> LayerContextBuilder<'a> {
    pub(crate) fn new(layers: &'a [Layer]) -> Self {
        Self {
            by_index: layers.iter().map(|l| (l.index, l)).collect(),
        }
    }

    /// Full context of a content-bearing layer, outermost first.
    pub(crate) fn build(
        &self,
        layer: &Layer,
        session: &mut TranslationSession,
    ) -> IrResult<RenderingContext> {
        let timing = LayerTiming::of(layer);
        if layer.time_stretch != 1.0 {
            session.report(
                IssueCode::TimeStretch,
                format!(
                    "layer \"{}\" uses time stretch {}",
                    layer.name, layer.time_stretch
                ),
            )?;
        }

        let mut nodes = vec![RenderingContext::Metadata(Metadata {
            name: layer.name.clone(),
            layer_index: Some(layer.index),
        })];

        if timing.stretch != 1.0 {
            nodes.push(RenderingContext::TimeStretch(timing.stretch));
        }
        let offset = timing.start_time / timing.stretch;
        if offset != 0.0 {
            nodes.push(RenderingContext::TimeOffset(offset));
        }

        let visibility = if layer.hidden {
            VisibilityWindow::never()
        } else {
            VisibilityWindow::between(
                (layer.in_point - timing.start_time) / timing.stretch,
                (layer.out_point - timing.start_time) / timing.stretch,
            )
        };
        nodes.push(RenderingContext::Visibility(visibility));
        nodes.push(RenderingContext::Opacity(opacity_fraction(
            &layer.transform.opacity,
        )));

        if layer.blend_mode != BlendMode::Normal {
            session.report(
                IssueCode::BlendModeNotNormal,
                format!(
                    "layer \"{}\" uses blend mode {:?}",
                    layer.name, layer.blend_mode
                ),
            )?;
        }
        nodes.push(RenderingContext::BlendMode(layer.blend_mode));

        if !layer.masks.is_empty() {
            nodes.push(RenderingContext::Mask(
                layer
                    .masks
                    .iter()
                    .map(|m| MaskShape {
                        mode: m.mode,
                        path: ContextValue::from_animatable(&m.path),
                        opacity: opacity_fraction(&m.opacity),
                        inverted: m.inverted,
                    })
                    .collect(),
            ));
        }
        if let Some(matte) = layer.matte {
            nodes.push(RenderingContext::MatteType(matte));
        }
        if layer.is_3d {
            session.report(
                IssueCode::ThreeDLayer,
                format!("layer \"{}\" is a 3D layer", layer.name),
            )?;
            nodes.push(RenderingContext::Unsupported("3d layer".to_owned()));
        }

        for ancestor in self.ancestors(layer, session)?.into_iter().rev() {
            nodes.extend(parent_transform(ancestor, timing));
        }
        nodes.extend(transform_chain(&layer.transform));

        for effect in &layer.effects {
            nodes.push(RenderingContext::Effect(Arc::new(effect_context(effect))));
        }

        Ok(RenderingContext::compose(nodes))
    }

    /// Parent chain nearest first. Stops at a missing or repeated parent and reports it.
    fn ancestors(
        &self,
        layer: &Layer,
        session: &mut TranslationSession,
    ) -> IrResult<Vec<&'a Layer>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::from([layer.index]);
        let mut next = layer.parent;
        while let Some(index) = next {
            if !seen.insert(index) {
                session.report(
                    IssueCode::InvalidParent,
                    format!("layer \"{}\" has a cyclic parent chain", layer.name),
                )?;
                break;
            }
            let Some(parent) = self.by_index.get(&index).copied() else {
                session.report(
                    IssueCode::InvalidParent,
                    format!(
                        "layer \"{}\" references missing parent {index}",
                        layer.name
                    ),
                )?;
                break;
            };
            chain.push(parent);
            next = parent.parent;
        }
        Ok(chain)
    }
}

/// Parent transforms wrapped so the parent's keyframes run on the parent's own clock, then the
/// child's clock is restored.
fn parent_transform(parent: &Layer, child: LayerTiming) -> Vec<RenderingContext> {
    let chain = transform_chain(&parent.transform);
    if chain.is_empty() {
        return chain;
    }
    let p = LayerTiming::of(parent);
    let stretch = p.stretch / child.stretch;
    let offset = (p.start_time - child.start_time) / p.stretch;

    let mut out = Vec::with_capacity(chain.len() + 4);
    if stretch != 1.0 {
        out.push(RenderingContext::TimeStretch(stretch));
    }
    if offset != 0.0 {
        out.push(RenderingContext::TimeOffset(offset));
    }
    out.extend(chain);
    if offset != 0.0 {
        out.push(RenderingContext::TimeOffset(-offset));
    }
    if stretch != 1.0 {
        out.push(RenderingContext::TimeStretch(child.stretch / p.stretch));
    }
    out
}

fn effect_context(effect: &Effect) -> EffectContext {
    match effect {
        Effect::GaussianBlur { blurriness } => EffectContext::GaussianBlur {
            blurriness: ContextValue::from_animatable(blurriness),
        },
        Effect::DropShadow {
            color,
            opacity,
            direction,
            distance,
            softness,
        } => EffectContext::DropShadow {
            color: ContextValue::from_animatable(color),
            opacity: opacity_fraction(opacity),
            direction: ContextValue::from_animatable(direction),
            distance: ContextValue::from_animatable(distance),
            softness: ContextValue::from_animatable(softness),
        },
        Effect::Unsupported { name } => EffectContext::Unsupported { name: name.clone() },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/detreeify/layers.rs"]
mod tests;
