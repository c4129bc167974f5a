use super::*;

#[test]
fn endpoints_are_fixed() {
    let eases = [
        Ease::Linear,
        Ease::CubicBezier {
            x1: 0.42,
            y1: 0.0,
            x2: 0.58,
            y2: 1.0,
        },
    ];
    for e in eases {
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert_eq!(e.apply(-3.0), 0.0);
        assert_eq!(e.apply(7.0), 1.0);
    }
}

#[test]
fn hold_never_advances() {
    assert_eq!(Ease::Hold.apply(0.0), 0.0);
    assert_eq!(Ease::Hold.apply(0.99), 0.0);
}

#[test]
fn symmetric_bezier_passes_through_midpoint() {
    let e = Ease::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };
    assert!((e.apply(0.5) - 0.5).abs() < 1e-3);
    assert!(e.apply(0.25) < 0.25);
}

#[test]
fn linear_bezier_is_identity() {
    let e = Ease::CubicBezier {
        x1: 1.0 / 3.0,
        y1: 1.0 / 3.0,
        x2: 2.0 / 3.0,
        y2: 2.0 / 3.0,
    };
    for i in 1..10 {
        let t = f64::from(i) / 10.0;
        assert!((e.apply(t) - t).abs() < 1e-3, "t={t}");
    }
}

#[test]
fn serde_shorthands() {
    let hold: Ease = serde_json::from_str("\"hold\"").unwrap();
    assert_eq!(hold, Ease::Hold);
    let bez: Ease = serde_json::from_str(r#"{"cubic_bezier":[0.1,0.2,0.3,0.4]}"#).unwrap();
    assert_eq!(
        bez,
        Ease::CubicBezier {
            x1: 0.1,
            y1: 0.2,
            x2: 0.3,
            y2: 0.4
        }
    );
    assert!(serde_json::from_str::<Ease>("\"bouncy\"").is_err());
    assert!(serde_json::from_str::<Ease>(r#"{"cubic_bezier":[1.5,0,0,1]}"#).is_err());

    let back = serde_json::to_string(&bez).unwrap();
    assert_eq!(serde_json::from_str::<Ease>(&back).unwrap(), bez);
}
