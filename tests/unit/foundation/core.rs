use super::*;

#[test]
fn hex_colors_parse() {
    let c = Color::from_hex("#ff000080").unwrap();
    assert_eq!(c.r, 1.0);
    assert_eq!(c.g, 0.0);
    assert!((c.a - 128.0 / 255.0).abs() < 1e-12);

    let opaque = Color::from_hex("#336699").unwrap();
    assert_eq!(opaque.a, 1.0);
}

#[test]
fn bad_hex_is_validation_error() {
    assert!(matches!(
        Color::from_hex("336699"),
        Err(IrError::Validation(_))
    ));
    assert!(Color::from_hex("#12345").is_err());
    assert!(Color::from_hex("#zzzzzz").is_err());
}

#[test]
fn fingerprint_distinguishes_colors() {
    assert_eq!(Color::BLACK.fingerprint(), Color::BLACK.fingerprint());
    assert_ne!(Color::BLACK.fingerprint(), Color::WHITE.fingerprint());
}

#[test]
fn alpha_defaults_to_opaque() {
    let c: Color = serde_json::from_str(r#"{"r":0.5,"g":0.5,"b":0.5}"#).unwrap();
    assert_eq!(c.a, 1.0);
}
