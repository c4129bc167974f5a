use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        IrError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        IrError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(IrError::internal("x").to_string().contains("internal error:"));
    assert!(
        IrError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn issue_display_carries_code() {
    let err = IrError::Issue {
        code: "LT0019",
        description: "text layers are not supported".to_owned(),
    };
    let s = err.to_string();
    assert!(s.contains("LT0019"));
    assert!(s.contains("text layers"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = IrError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
