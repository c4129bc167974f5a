use super::*;
use crate::context::node::ContextKind;
use crate::eval::resolve::resolve;
use crate::foundation::core::{Affine, Point};
use crate::optimize::{OptimizeOpts, optimize};
use crate::session::translation_session::TranslateOpts;
use serde_json::json;

fn layer(value: serde_json::Value) -> Layer {
    serde_json::from_value(value).unwrap()
}

fn session() -> TranslationSession {
    TranslationSession::new(TranslateOpts::default()).unwrap()
}

fn close(a: Affine, b: Affine) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.as_coeffs())
        .all(|(x, y)| (x - y).abs() < 1e-9)
}

#[test]
fn identity_transforms_are_omitted() {
    assert!(transform_chain(&Transform::default()).is_empty());
    let t: Transform = serde_json::from_value(json!({
        "position": {"x": 3, "y": 4},
        "scale": {"x": 100, "y": 100}
    }))
    .unwrap();
    let chain = transform_chain(&t);
    assert_eq!(chain.len(), 1);
    assert!(chain[0].is(ContextKind::Position));
}

#[test]
fn three_level_parent_chain_matches_matrix_product() {
    let layers = vec![
        layer(json!({"type": "null", "index": 1, "in_point": 0, "out_point": 60,
            "transform": {"rotation": 90}})),
        layer(json!({"type": "null", "index": 2, "parent": 1, "in_point": 0, "out_point": 60,
            "transform": {"position": {"x": 10, "y": 0}}})),
        layer(json!({"type": "solid", "index": 3, "parent": 2, "in_point": 0, "out_point": 60,
            "color": {"r": 1, "g": 0, "b": 0}, "width": 10, "height": 10,
            "transform": {"position": {"x": 0, "y": 5}}})),
    ];
    let builder = LayerContextBuilder::new(&layers);
    let mut session = session();
    let ctx = builder.build(&layers[2], &mut session).unwrap();
    assert!(session.issues().is_empty());

    let expected = Affine::rotate(90f64.to_radians())
        * Affine::translate((10.0, 0.0))
        * Affine::translate((0.0, 5.0));
    let resolved = resolve(&ctx, 0.0).unwrap();
    assert!(close(resolved.transform, expected), "{:?}", resolved.transform);
    let p = resolved.apply(Point::ORIGIN);
    assert!((p.x - -5.0).abs() < 1e-9 && (p.y - 10.0).abs() < 1e-9);
}

#[test]
fn parent_anchor_does_not_move_the_child_pivot() {
    let layers = vec![
        layer(json!({"type": "null", "index": 1, "in_point": 0, "out_point": 60,
            "transform": {"anchor": {"x": 10, "y": 0}}})),
        layer(json!({"type": "solid", "index": 2, "parent": 1, "in_point": 0, "out_point": 60,
            "color": {"r": 1, "g": 0, "b": 0}, "width": 10, "height": 10,
            "transform": {"rotation": 90}})),
    ];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[1], &mut session).unwrap();

    let expected = Affine::translate((-10.0, 0.0)) * Affine::rotate(90f64.to_radians());
    let resolved = resolve(&ctx, 0.0).unwrap();
    assert!(close(resolved.transform, expected), "{:?}", resolved.transform);
    let p = resolved.apply(Point::new(1.0, 0.0));
    assert!((p.x - -10.0).abs() < 1e-9 && (p.y - 1.0).abs() < 1e-9, "{p:?}");

    let optimized = optimize(&ctx, &OptimizeOpts::default()).unwrap();
    assert!(!optimized.contains(ContextKind::Anchor));
    let again = resolve(&optimized, 0.0).unwrap();
    assert!(close(again.transform, expected), "{:?}", again.transform);
}

#[test]
fn anchored_three_level_chain_matches_matrix_product() {
    let layers = vec![
        layer(json!({"type": "null", "index": 1, "in_point": 0, "out_point": 60,
            "transform": {"anchor": {"x": 4, "y": 2}, "position": {"x": 30, "y": 0},
                "rotation": 30}})),
        layer(json!({"type": "null", "index": 2, "parent": 1, "in_point": 0, "out_point": 60,
            "transform": {"anchor": {"x": -3, "y": 7}, "scale": {"x": 200, "y": 50}}})),
        layer(json!({"type": "solid", "index": 3, "parent": 2, "in_point": 0, "out_point": 60,
            "color": {"r": 1, "g": 0, "b": 0}, "width": 10, "height": 10,
            "transform": {"position": {"x": 1, "y": 1}, "rotation": -45,
                "scale": {"x": 50, "y": 50}}})),
    ];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[2], &mut session).unwrap();

    let lottie = |anchor: (f64, f64), position: (f64, f64), degrees: f64, scale: (f64, f64)| {
        Affine::translate(position)
            * Affine::rotate(degrees.to_radians())
            * Affine::scale_non_uniform(scale.0, scale.1)
            * Affine::translate((-anchor.0, -anchor.1))
    };
    let expected = lottie((4.0, 2.0), (30.0, 0.0), 30.0, (1.0, 1.0))
        * lottie((-3.0, 7.0), (0.0, 0.0), 0.0, (2.0, 0.5))
        * lottie((0.0, 0.0), (1.0, 1.0), -45.0, (0.5, 0.5));
    let resolved = resolve(&ctx, 0.0).unwrap();
    assert!(close(resolved.transform, expected), "{:?}", resolved.transform);

    let optimized = optimize(&ctx, &OptimizeOpts::default()).unwrap();
    let again = resolve(&optimized, 0.0).unwrap();
    assert!(close(again.transform, expected), "{:?}", again.transform);
}

#[test]
fn zero_anchor_is_kept_only_ahead_of_rotation_or_scale() {
    let t: Transform = serde_json::from_value(json!({"scale": {"x": 50, "y": 50}})).unwrap();
    let kinds: Vec<ContextKind> = transform_chain(&t).iter().map(RenderingContext::kind).collect();
    assert_eq!(kinds, vec![ContextKind::Anchor, ContextKind::Scale]);
    assert_eq!(
        transform_chain(&t)[0],
        RenderingContext::Anchor(ContextValue::Static(Vec2::ZERO))
    );
}

#[test]
fn layer_context_order() {
    let l = layer(json!({"type": "solid", "index": 1, "in_point": 10, "out_point": 50,
        "start_time": 4, "blend_mode": "multiply", "matte": "alpha",
        "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1,
        "transform": {"opacity": 50, "position": {"x": 1, "y": 1}}}));
    let layers = vec![l];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[0], &mut session).unwrap();
    let kinds: Vec<ContextKind> = ctx.children().iter().map(RenderingContext::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContextKind::Metadata,
            ContextKind::TimeOffset,
            ContextKind::Visibility,
            ContextKind::Opacity,
            ContextKind::BlendMode,
            ContextKind::MatteType,
            ContextKind::Position,
        ]
    );
    assert_eq!(ctx.children()[1], RenderingContext::TimeOffset(4.0));
    assert_eq!(
        ctx.children()[2],
        RenderingContext::Visibility(VisibilityWindow::between(6.0, 46.0))
    );
    assert_eq!(ctx.children()[3], RenderingContext::Opacity(ContextValue::Static(0.5)));
    assert!(session.issues().iter().any(|i| i.code == IssueCode::BlendModeNotNormal));
}

#[test]
fn time_stretch_is_reported_and_applied() {
    let layers = vec![layer(json!({"type": "solid", "index": 1, "in_point": 0, "out_point": 40,
        "time_stretch": 2, "start_time": 10,
        "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1}))];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[0], &mut session).unwrap();
    assert!(session.issues().iter().any(|i| i.code == IssueCode::TimeStretch));
    assert_eq!(ctx.children()[1], RenderingContext::TimeStretch(2.0));
    assert_eq!(ctx.children()[2], RenderingContext::TimeOffset(5.0));

    let (unified, _) = ctx.unify_timebase().unwrap();
    let vis = unified
        .children()
        .iter()
        .find_map(|c| match c {
            RenderingContext::Visibility(w) => Some(w.clone()),
            _ => None,
        })
        .unwrap();
    // back in composition frames
    assert_eq!(vis.state_changes(), &[0.0, 40.0]);
}

#[test]
fn non_positive_stretch_falls_back_to_one() {
    let layers = vec![layer(json!({"type": "solid", "index": 1, "in_point": 0, "out_point": 40,
        "time_stretch": 0,
        "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1}))];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[0], &mut session).unwrap();
    assert!(!ctx.contains(ContextKind::TimeStretch));
    assert!(session.issues().iter().any(|i| i.code == IssueCode::TimeStretch));
}

#[test]
fn parent_transforms_run_on_the_parent_clock() {
    let layers = vec![
        layer(json!({"type": "null", "index": 1, "in_point": 0, "out_point": 100, "start_time": 10,
            "transform": {"position": {"keyframes": [
                {"frame": 0, "value": {"x": 0, "y": 0}},
                {"frame": 10, "value": {"x": 100, "y": 0}}
            ]}}})),
        layer(json!({"type": "solid", "index": 2, "parent": 1, "in_point": 0, "out_point": 100,
            "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1})),
    ];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[1], &mut session).unwrap();
    assert_eq!(ctx.count(ContextKind::TimeOffset), 2);

    let at = |frame| resolve(&ctx, frame).unwrap().apply(Point::ORIGIN).x;
    assert!((at(10.0) - 0.0).abs() < 1e-9);
    assert!((at(15.0) - 50.0).abs() < 1e-9);
    assert!((at(20.0) - 100.0).abs() < 1e-9);
}

#[test]
fn missing_and_cyclic_parents_are_reported() {
    let layers = vec![
        layer(json!({"type": "null", "index": 1, "parent": 2, "in_point": 0, "out_point": 1})),
        layer(json!({"type": "null", "index": 2, "parent": 1, "in_point": 0, "out_point": 1})),
        layer(json!({"type": "solid", "index": 3, "parent": 9, "in_point": 0, "out_point": 1,
            "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1})),
    ];
    let builder = LayerContextBuilder::new(&layers);
    let mut session = session();
    builder.build(&layers[0], &mut session).unwrap();
    builder.build(&layers[2], &mut session).unwrap();
    let parent_issues = session
        .issues()
        .iter()
        .filter(|i| i.code == IssueCode::InvalidParent)
        .count();
    assert_eq!(parent_issues, 2);
}

#[test]
fn three_d_layers_get_an_unsupported_node() {
    let layers = vec![layer(json!({"type": "solid", "index": 1, "in_point": 0, "out_point": 1,
        "is_3d": true, "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1}))];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[0], &mut session).unwrap();
    assert!(ctx.contains(ContextKind::Unsupported));
    assert!(session.issues().iter().any(|i| i.code == IssueCode::ThreeDLayer));
}

#[test]
fn effects_are_appended_last() {
    let layers = vec![layer(json!({"type": "solid", "index": 1, "in_point": 0, "out_point": 1,
        "color": {"r": 1, "g": 1, "b": 1}, "width": 1, "height": 1,
        "transform": {"rotation": 10},
        "effects": [{"type": "gaussian_blur", "blurriness": 4}]}))];
    let mut session = session();
    let ctx = LayerContextBuilder::new(&layers).build(&layers[0], &mut session).unwrap();
    let last = ctx.children().last().unwrap();
    let RenderingContext::Effect(effect) = last else {
        panic!("expected effect, got {last:?}");
    };
    assert_eq!(
        **effect,
        EffectContext::GaussianBlur {
            blurriness: ContextValue::Static(4.0)
        }
    );
}
