use std::collections::HashSet;
use std::fmt;

/// Stable identifiers for degraded-translation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueCode {
    /// A layer blend mode other than `Normal`.
    BlendModeNotNormal,
    /// A gradient feature that is approximated.
    GradientUnsupported,
    /// More than one fill in a shape group.
    MultipleFills,
    /// More than one stroke in a shape group.
    MultipleStrokes,
    /// More than one trim path in a shape group.
    MultipleTrimPaths,
    /// A star or polygon shape.
    Polystar,
    /// A repeater shape.
    Repeater,
    /// A text layer.
    TextLayer,
    /// A 3D layer.
    ThreeDLayer,
    /// A layer time stretch other than 1.
    TimeStretch,
    /// A `ref_id` with no matching asset.
    MissingAsset,
    /// A `ref_id` naming an asset of the wrong kind, or a precomp that contains itself.
    InvalidAssetReference,
    /// A missing or cyclic parent.
    InvalidParent,
    /// A merge paths shape.
    MergePaths,
}

impl IssueCode {
    /// Stable `LTxxxx` identifier.
    pub fn code(self) -> &'static str {
        match self {
            Self::BlendModeNotNormal => "LT0004",
            Self::GradientUnsupported => "LT0006",
            Self::MultipleFills => "LT0012",
            Self::MultipleStrokes => "LT0013",
            Self::MultipleTrimPaths => "LT0014",
            Self::Polystar => "LT0017",
            Self::Repeater => "LT0018",
            Self::TextLayer => "LT0019",
            Self::ThreeDLayer => "LT0021",
            Self::TimeStretch => "LT0022",
            Self::MissingAsset => "LT0028",
            Self::InvalidAssetReference => "LT0029",
            Self::InvalidParent => "LT0030",
            Self::MergePaths => "LT0031",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One reported degradation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationIssue {
    /// What kind of degradation.
    pub code: IssueCode,
    /// Where and what, for humans.
    pub description: String,
}

impl fmt::Display for TranslationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

/// Insertion-ordered, de-duplicated issue list.
#[derive(Debug, Clone, Default)]
pub struct IssueLog {
    issues: Vec<TranslationIssue>,
    seen: HashSet<TranslationIssue>,
}

impl IssueLog {
    /// Record an issue; returns `false` if an identical one was already present.
    pub fn push(&mut self, issue: TranslationIssue) -> bool {
        if !self.seen.insert(issue.clone()) {
            return false;
        }
        self.issues.push(issue);
        true
    }

    /// Issues in the order first reported.
    pub fn issues(&self) -> &[TranslationIssue] {
        &self.issues
    }

    /// Whether any issue has `code`.
    pub fn contains(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    /// Whether nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of distinct issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Issues in the order first reported.
    pub fn into_vec(self) -> Vec<TranslationIssue> {
        self.issues
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/issues.rs"]
mod tests;
