//! Maps a commit message onto a bump type and a changeset summary.
//!
//! Rules are tried in order and the first match wins:
//!
//! | rule | pattern | bump |
//! |---|---|---|
//! | `breaking-change` | `BREAKING CHANGE: <summary>` | major |
//! | `feat` | `feat(<scope>): <summary>` | minor |
//! | `fix` | `fix(<scope>): <summary>` | patch |
//!
//! Anything else is a patch release with [`FALLBACK_SUMMARY`]. The scope is
//! required but never narrows which packages are released.

use std::sync::LazyLock;

use changeset_core::BumpType;
use changeset_git::CommitInfo;
use regex::Regex;

pub const FALLBACK_SUMMARY: &str = "chore(release): bump version via CI";

static BREAKING_CHANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^BREAKING CHANGE: (.+)").expect("breaking change pattern is valid")
});

static FEATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^feat\(([^)]+)\): (.+)").expect("feat pattern is valid"));

static FIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fix\(([^)]+)\): (.+)").expect("fix pattern is valid"));

struct Rule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    bump_type: BumpType,
    summary_group: usize,
}

static RULES: &[Rule] = &[
    Rule {
        name: "breaking-change",
        pattern: &BREAKING_CHANGE,
        bump_type: BumpType::Major,
        summary_group: 1,
    },
    Rule {
        name: "feat",
        pattern: &FEATURE,
        bump_type: BumpType::Minor,
        summary_group: 2,
    },
    Rule {
        name: "fix",
        pattern: &FIX,
        bump_type: BumpType::Patch,
        summary_group: 2,
    },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub bump_type: BumpType,
    pub summary: String,
    /// Name of the matching rule, `None` when the fallback applied.
    pub rule: Option<&'static str>,
}

impl Classification {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.rule.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct CommitClassifier {
    fallback_summary: String,
}

impl CommitClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fallback_summary: FALLBACK_SUMMARY.to_string(),
        }
    }

    #[must_use]
    pub fn with_fallback_summary(mut self, summary: impl Into<String>) -> Self {
        self.fallback_summary = summary.into();
        self
    }

    /// Classifies a single-line commit subject.
    #[must_use]
    pub fn classify(&self, subject: &str) -> Classification {
        for rule in RULES {
            let Some(captures) = rule.pattern.captures(subject) else {
                continue;
            };
            if let Some(summary) = captures.get(rule.summary_group) {
                return Classification {
                    bump_type: rule.bump_type,
                    summary: summary.as_str().to_string(),
                    rule: Some(rule.name),
                };
            }
        }

        Classification {
            bump_type: BumpType::Patch,
            summary: self.fallback_summary.clone(),
            rule: None,
        }
    }

    /// Classifies the subject of a commit message.
    #[must_use]
    pub fn classify_commit(&self, commit: &CommitInfo) -> Classification {
        self.classify(&commit.subject())
    }
}

impl Default for CommitClassifier {
    fn default() -> Self {
        Self::new()
    }
}
