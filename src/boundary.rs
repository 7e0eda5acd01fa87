use std::fmt;
use std::path::PathBuf;

/// Warnings raised at the edges of a run: repository state, tags and input files.
/// These are non-fatal issues that are returned to the caller and reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No new commits since the latest tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag matches the tag pattern but cannot be parsed as a semantic version
    UnparsableTag { tag: String, reason: String },
    /// A template region was opened but its closing marker never appeared
    UnterminatedTemplate { path: PathBuf, line: usize },
    /// An input file of a rewrite batch does not exist
    MissingFile { path: PathBuf },
    /// An input file of a rewrite batch exists but could not be read
    UnreadableFile { path: PathBuf, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = if current_commit_hash.len() > 7 {
                    &current_commit_hash[..7]
                } else {
                    current_commit_hash.as_str()
                };
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::UnparsableTag { tag, reason } => {
                write!(f, "Cannot parse tag '{}': {}", tag, reason)
            }
            BoundaryWarning::UnterminatedTemplate { path, line } => {
                write!(
                    f,
                    "Unterminated template region in '{}' at line {}; left unchanged",
                    path.display(),
                    line
                )
            }
            BoundaryWarning::MissingFile { path } => {
                write!(f, "File '{}' does not exist; skipped", path.display())
            }
            BoundaryWarning::UnreadableFile { path, reason } => {
                write!(
                    f,
                    "Cannot read '{}': {}; skipped",
                    path.display(),
                    reason
                )
            }
        }
    }
}
