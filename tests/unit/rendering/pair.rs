use super::*;
use crate::animation::anim::{Animatable, Keyframe};
use crate::animation::ease::Ease;
use crate::context::value::ContextValue;
use crate::model::shape::{PathGeometry, PathVertex};
use crate::rendering::content::{ShapeContent, ShapeGeometry};
use crate::foundation::core::Vec2;

fn triangle(dx: f64) -> PathGeometry {
    PathGeometry {
        vertices: [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]
            .into_iter()
            .map(|(x, y)| PathVertex {
                point: Vec2::new(x + dx, y),
                in_tangent: Vec2::ZERO,
                out_tangent: Vec2::ZERO,
            })
            .collect(),
        closed: true,
    }
}

fn animated_shape() -> RenderingContent {
    let path = Animatable::new(vec![
        Keyframe::new(0.0, triangle(0.0), Ease::Linear),
        Keyframe::new(10.0, triangle(10.0), Ease::Linear),
    ])
    .unwrap();
    RenderingContent::Shape(ShapeContent {
        geometry: ShapeGeometry::Path(ContextValue::from_animatable(&path)),
        trim: None,
    })
}

#[test]
fn visibility_is_the_conjunction() {
    let r = Rendering::new(
        RenderingContent::Unsupported("text".into()),
        RenderingContext::compose([
            RenderingContext::Visibility(VisibilityWindow::between(0.0, 10.0)),
            RenderingContext::Visibility(VisibilityWindow::between(5.0, 20.0)),
        ]),
    );
    assert_eq!(r.visibility().state_changes(), &[5.0, 10.0]);
    assert!(!r.is_never_visible());
}

#[test]
fn no_visibility_nodes_means_always_visible() {
    let r = Rendering::new(RenderingContent::Unsupported("x".into()), RenderingContext::Null);
    assert!(r.visibility().is_always_visible());
}

#[test]
fn wrapped_in_puts_outer_first() {
    let inner = RenderingContext::Opacity(ContextValue::Static(0.5));
    let outer = RenderingContext::TimeOffset(1.0);
    let r = Rendering::new(RenderingContent::Unsupported("x".into()), inner.clone()).wrapped_in(outer.clone());
    assert_eq!(r.context.children(), &[outer, inner]);
    assert!(r.has_context(ContextKind::TimeOffset));
}

#[test]
fn unify_timebase_remaps_content() {
    let r = Rendering::new(animated_shape(), RenderingContext::TimeOffset(5.0));
    let unified = r.unify_timebase().unwrap();
    assert!(unified.context.is_null());
    let RenderingContent::Shape(ShapeContent {
        geometry: ShapeGeometry::Path(path),
        ..
    }) = &unified.content
    else {
        panic!("expected path");
    };
    assert_eq!(path.sample(5.0), triangle(0.0));
    assert_eq!(path.sample(15.0), triangle(10.0));
    assert_eq!(unified.content.path_segment_count(), Some(3));
}
