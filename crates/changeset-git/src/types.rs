use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileChange {
    #[must_use]
    pub fn new(path: PathBuf, status: FileStatus) -> Self {
        Self { path, status }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
}

impl CommitInfo {
    /// The first paragraph of the message with its lines joined by single
    /// spaces, the same text `git log --format=%s` prints.
    ///
    /// Leading blank lines and trailing whitespace are dropped. Leading
    /// whitespace on a line is kept.
    #[must_use]
    pub fn subject(&self) -> String {
        self.message
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .take_while(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> CommitInfo {
        CommitInfo {
            sha: "0123456789abcdef".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn subject_of_single_line_message() {
        assert_eq!(
            commit("fix(auth): correct token expiry\n").subject(),
            "fix(auth): correct token expiry"
        );
    }

    #[test]
    fn subject_stops_at_first_blank_line() {
        let info = commit("feat(ui): add dark mode\n\nLonger body\nwith details");

        assert_eq!(info.subject(), "feat(ui): add dark mode");
    }

    #[test]
    fn subject_joins_wrapped_first_paragraph() {
        let info = commit("feat(ui): add dark\nmode toggle\n\nbody");

        assert_eq!(info.subject(), "feat(ui): add dark mode toggle");
    }

    #[test]
    fn subject_skips_leading_blank_lines_and_trailing_spaces() {
        let info = commit("\n  \nfix(auth): expiry   \n\nbody");

        assert_eq!(info.subject(), "fix(auth): expiry");
    }

    #[test]
    fn subject_keeps_leading_indentation() {
        assert_eq!(commit(" feat(ui): x").subject(), " feat(ui): x");
    }

    #[test]
    fn subject_of_empty_message() {
        assert_eq!(commit("").subject(), "");
    }

    #[test]
    fn short_sha_truncates_to_seven_characters() {
        assert_eq!(commit("x").short_sha(), "0123456");

        let short = CommitInfo {
            sha: "abc".to_string(),
            message: String::new(),
        };
        assert_eq!(short.short_sha(), "abc");
    }
}
