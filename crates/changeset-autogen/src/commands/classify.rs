use changeset_git::CommitInfo;
use changeset_operations::{Classification, CommitClassifier};

pub(crate) fn run(message: &str, fallback_summary: Option<String>, quiet: bool) {
    let classification = classify(message, fallback_summary);
    if !quiet {
        println!("{}", format_classification(&classification));
    }
}

fn classify(message: &str, fallback_summary: Option<String>) -> Classification {
    let classifier = match fallback_summary {
        Some(summary) => CommitClassifier::new().with_fallback_summary(summary),
        None => CommitClassifier::new(),
    };
    let commit = CommitInfo {
        sha: String::new(),
        message: message.to_string(),
    };
    classifier.classify_commit(&commit)
}

fn format_classification(classification: &Classification) -> String {
    format!(
        "{} ({}): {}",
        classification.bump_type,
        classification.rule.unwrap_or("fallback"),
        classification.summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_matched_rule() {
        let classification = classify("fix(auth): correct token expiry", None);

        assert_eq!(
            format_classification(&classification),
            "patch (fix): correct token expiry"
        );
    }

    #[test]
    fn formats_fallback() {
        let classification = classify("chore: bump deps", Some("release".to_string()));

        assert_eq!(
            format_classification(&classification),
            "patch (fallback): release"
        );
    }

    #[test]
    fn uses_first_line_only() {
        let classification = classify("feat(ui): add dark mode\n\nLong body.", None);

        assert_eq!(classification.summary, "add dark mode");
    }
}
