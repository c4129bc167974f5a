use super::*;

fn issue(code: IssueCode, description: &str) -> TranslationIssue {
    TranslationIssue {
        code,
        description: description.to_owned(),
    }
}

#[test]
fn codes_are_stable() {
    assert_eq!(IssueCode::BlendModeNotNormal.code(), "LT0004");
    assert_eq!(IssueCode::TimeStretch.code(), "LT0022");
    assert_eq!(IssueCode::MissingAsset.code(), "LT0028");
    assert_eq!(IssueCode::MergePaths.to_string(), "LT0031");
}

#[test]
fn display_includes_code() {
    let i = issue(IssueCode::TextLayer, "text layer \"title\" is not supported");
    assert_eq!(i.to_string(), "LT0019: text layer \"title\" is not supported");
}

#[test]
fn log_dedupes_and_keeps_order() {
    let mut log = IssueLog::default();
    assert!(log.is_empty());
    assert!(log.push(issue(IssueCode::Polystar, "a")));
    assert!(log.push(issue(IssueCode::Repeater, "b")));
    assert!(!log.push(issue(IssueCode::Polystar, "a")));
    assert!(log.push(issue(IssueCode::Polystar, "c")));

    assert_eq!(log.len(), 3);
    assert!(log.contains(IssueCode::Repeater));
    assert!(!log.contains(IssueCode::TextLayer));
    let codes: Vec<_> = log.into_vec().into_iter().map(|i| i.code).collect();
    assert_eq!(
        codes,
        vec![IssueCode::Polystar, IssueCode::Repeater, IssueCode::Polystar]
    );
}
