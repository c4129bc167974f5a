use super::*;
use crate::context::node::ContextKind;
use crate::foundation::core::Vec2;
use crate::session::translation_session::TranslateOpts;
use serde_json::json;

fn items(value: serde_json::Value) -> Vec<ShapeItem> {
    serde_json::from_value(value).unwrap()
}

fn session() -> TranslationSession {
    TranslationSession::new(TranslateOpts::default()).unwrap()
}

fn rect(x: f64) -> serde_json::Value {
    json!({"type": "rectangle", "position": {"x": x, "y": 0}, "size": {"x": 10, "y": 10}})
}

fn fill(r: f64) -> serde_json::Value {
    json!({"type": "fill", "color": {"r": r, "g": 0, "b": 0}})
}

fn stroke() -> serde_json::Value {
    json!({"type": "stroke", "color": {"r": 0, "g": 0, "b": 1}, "width": 2})
}

fn rect_x(r: &Rendering) -> f64 {
    match &r.content {
        RenderingContent::Shape(ShapeContent {
            geometry: ShapeGeometry::Rectangle { position, .. },
            ..
        }) => position.initial().x,
        other => panic!("expected rectangle, got {other:?}"),
    }
}

#[test]
fn fill_then_stroke_bottom_first() {
    let shapes = items(json!([rect(0.0), fill(1.0), stroke()]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    assert_eq!(out.len(), 2);
    assert!(out[0].context.is(ContextKind::Fill));
    assert!(out[1].context.is(ContextKind::Stroke));
    assert!(session.issues().is_empty());
}

#[test]
fn later_items_draw_beneath() {
    let shapes = items(json!([rect(1.0), rect(2.0), fill(1.0)]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    let xs: Vec<f64> = out.iter().map(rect_x).collect();
    assert_eq!(xs, vec![2.0, 1.0]);
}

#[test]
fn groups_wrap_children_and_inherit_paint() {
    let shapes = items(json!([
        {"type": "group", "items": [rect(5.0)],
         "transform": {"position": {"x": 3, "y": 0}, "opacity": 50}},
        fill(1.0)
    ]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    assert_eq!(out.len(), 1);
    let kinds: Vec<ContextKind> = out[0].context.children().iter().map(RenderingContext::kind).collect();
    assert_eq!(
        kinds,
        vec![ContextKind::Opacity, ContextKind::Position, ContextKind::Fill]
    );
}

#[test]
fn inner_fill_overrides_outer() {
    let shapes = items(json!([
        {"type": "group", "items": [rect(0.0), fill(0.5)]},
        fill(1.0)
    ]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    let RenderingContext::Fill(f) = &out[0].context else {
        panic!("expected bare fill");
    };
    let Brush::Solid(color) = f.brush.as_ref() else {
        panic!("expected solid brush");
    };
    assert_eq!(color.initial().r, 0.5);
}

#[test]
fn duplicate_paint_and_trim_are_reported() {
    let shapes = items(json!([
        rect(0.0),
        fill(1.0),
        fill(0.5),
        stroke(),
        stroke(),
        {"type": "trim_path", "end": 50},
        {"type": "trim_path"}
    ]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    let codes: Vec<IssueCode> = session.issues().iter().map(|i| i.code).collect();
    assert_eq!(
        codes,
        vec![
            IssueCode::MultipleFills,
            IssueCode::MultipleStrokes,
            IssueCode::MultipleTrimPaths
        ]
    );
    let RenderingContent::Shape(content) = &out[0].content else {
        panic!("expected shape");
    };
    let trim = content.trim.as_ref().unwrap();
    assert_eq!(trim.end, ContextValue::Static(50.0));
}

#[test]
fn unsupported_items_are_reported_and_skipped() {
    let shapes = items(json!([
        {"type": "polystar", "name": "star"},
        {"type": "repeater"},
        {"type": "merge_paths"},
        rect(0.0),
        fill(1.0)
    ]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    assert_eq!(out.len(), 1);
    for code in [IssueCode::Polystar, IssueCode::Repeater, IssueCode::MergePaths] {
        assert!(session.issues().iter().any(|i| i.code == code));
    }
}

#[test]
fn unpainted_geometry_draws_nothing() {
    let shapes = items(json!([rect(0.0)]));
    let out = shape_renderings(&shapes, &mut session()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn reversed_path_adds_direction() {
    let shapes = items(json!([
        {"type": "path", "reversed": true, "path": {"vertices": [
            {"point": {"x": 0, "y": 0}}, {"point": {"x": 1, "y": 0}}, {"point": {"x": 0, "y": 1}}
        ], "closed": true}},
        fill(1.0)
    ]));
    let out = shape_renderings(&shapes, &mut session()).unwrap();
    assert!(out[0].has_context(ContextKind::DrawingDirection));
    assert_eq!(out[0].content.path_segment_count(), Some(3));
}

#[test]
fn animated_radial_end_point_uses_initial_value() {
    let shapes = items(json!([
        rect(0.0),
        {"type": "gradient_fill", "gradient": {
            "kind": "radial",
            "start_point": {"x": 0, "y": 0},
            "end_point": {"keyframes": [
                {"frame": 0, "value": {"x": 5, "y": 0}},
                {"frame": 10, "value": {"x": 9, "y": 0}}
            ]},
            "stops": [{"offset": 0, "color": {"r": 1, "g": 1, "b": 1}}]
        }}
    ]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    assert!(session.issues().iter().any(|i| i.code == IssueCode::GradientUnsupported));
    let RenderingContext::Fill(f) = &out[0].context else {
        panic!("expected fill");
    };
    let Brush::Gradient(g) = f.brush.as_ref() else {
        panic!("expected gradient");
    };
    assert_eq!(g.end, ContextValue::Static(Vec2::new(5.0, 0.0)));
}

#[test]
fn solid_colors_share_brushes() {
    let shapes = items(json!([rect(0.0), rect(1.0), fill(1.0)]));
    let shapes2 = items(json!([rect(0.0), fill(1.0)]));
    let mut session = session();
    let a = shape_renderings(&shapes, &mut session).unwrap();
    let b = shape_renderings(&shapes2, &mut session).unwrap();
    let brush = |r: &Rendering| match &r.context {
        RenderingContext::Fill(f) => f.brush.clone(),
        other => panic!("expected fill, got {other:?}"),
    };
    assert!(Arc::ptr_eq(&brush(&a[0]), &brush(&b[0])));
}

fn fill_red(r: &Rendering) -> f64 {
    match &r.context {
        RenderingContext::Fill(f) => match f.brush.as_ref() {
            Brush::Solid(c) => c.initial().r,
            other => panic!("expected solid brush, got {other:?}"),
        },
        other => panic!("expected fill, got {other:?}"),
    }
}

#[test]
fn paint_listed_before_geometry_does_not_apply() {
    let shapes = items(json!([fill(1.0), rect(0.0)]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    assert!(out.is_empty());
    assert!(session.issues().is_empty());
}

#[test]
fn each_geometry_takes_the_nearest_following_paint() {
    let shapes = items(json!([rect(1.0), fill(1.0), rect(2.0), fill(0.25)]));
    let mut session = session();
    let out = shape_renderings(&shapes, &mut session).unwrap();
    let painted: Vec<(f64, f64)> = out.iter().map(|r| (rect_x(r), fill_red(r))).collect();
    assert_eq!(painted, vec![(2.0, 0.25), (1.0, 1.0)]);
    assert_eq!(
        session.issues().iter().map(|i| i.code).collect::<Vec<_>>(),
        vec![IssueCode::MultipleFills]
    );
}

#[test]
fn stroke_between_geometries_only_reaches_the_one_above_it() {
    let shapes = items(json!([rect(1.0), stroke(), rect(2.0), fill(1.0)]));
    let out = shape_renderings(&shapes, &mut session()).unwrap();
    let kinds: Vec<(f64, ContextKind)> = out.iter().map(|r| (rect_x(r), r.context.kind())).collect();
    assert_eq!(
        kinds,
        vec![
            (2.0, ContextKind::Fill),
            (1.0, ContextKind::Fill),
            (1.0, ContextKind::Stroke)
        ]
    );
}
