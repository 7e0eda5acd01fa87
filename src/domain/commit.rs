use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Footer keywords flagging a breaking change when no configuration is given
pub const DEFAULT_BREAKING_INDICATORS: &[&str] = &["BREAKING CHANGE:", "BREAKING-CHANGE:"];

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+)(?:\(([^)]*)\))?(!)?:\s*(.*)$").expect("valid regex literal")
});

/// One analyzed commit, parsed from a conventional-commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub hash: String,
    pub raw_message: String,
    /// Lowercased type token; empty when the header is not conventional
    pub r#type: String,
    pub scope: Option<String>,
    pub subject: String,
    pub breaking_notes: BTreeSet<String>,
    /// The type token carried the `!` shorthand
    pub has_breaking_marker: bool,
}

impl CommitRecord {
    /// Parse a commit message in the conventional-commits format
    /// Supports formats:
    /// - type(scope)!: description
    /// - type(scope): description
    /// - type!: description
    /// - type: description
    /// - non-conventional text (empty type, whole first line as subject)
    ///
    /// Footer lines starting with one of `breaking_indicators` contribute a breaking note.
    pub fn parse(hash: impl Into<String>, message: &str, breaking_indicators: &[String]) -> Self {
        let first_line = message.lines().next().unwrap_or("").trim();

        let header = HEADER.captures(first_line);

        let (r#type, scope, has_breaking_marker, subject) = match header {
            Some(captures) => {
                let r#type = captures
                    .get(1)
                    .map(|m| m.as_str().to_lowercase())
                    .unwrap_or_default();
                let scope = captures
                    .get(2)
                    .map(|m| m.as_str().trim().to_string())
                    .filter(|s| !s.is_empty());
                let has_exclamation = captures.get(3).is_some();
                let subject = captures
                    .get(4)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                (r#type, scope, has_exclamation, subject)
            }
            None => (String::new(), None, false, first_line.to_string()),
        };

        CommitRecord {
            hash: hash.into(),
            raw_message: message.to_string(),
            r#type,
            scope,
            subject,
            breaking_notes: collect_breaking_notes(message, breaking_indicators),
            has_breaking_marker,
        }
    }

    /// Parse with the default breaking-change indicators
    pub fn parse_default(hash: impl Into<String>, message: &str) -> Self {
        let indicators: Vec<String> = DEFAULT_BREAKING_INDICATORS
            .iter()
            .map(|s| s.to_string())
            .collect();
        Self::parse(hash, message, &indicators)
    }

    pub fn is_breaking(&self) -> bool {
        self.has_breaking_marker || !self.breaking_notes.is_empty()
    }

    /// First seven characters of the hash
    pub fn short_hash(&self) -> &str {
        match self.hash.char_indices().nth(7) {
            Some((idx, _)) => &self.hash[..idx],
            None => &self.hash,
        }
    }
}

/// Collect the text following each breaking-change indicator in the message
/// body. The header line is never a footer.
fn collect_breaking_notes(message: &str, indicators: &[String]) -> BTreeSet<String> {
    let mut notes = BTreeSet::new();

    for line in message.lines().skip(1) {
        let line = line.trim();
        for indicator in indicators {
            if let Some(note) = line.strip_prefix(indicator.as_str()) {
                let note = note.trim();
                notes.insert(if note.is_empty() {
                    indicator.trim_end_matches(':').to_string()
                } else {
                    note.to_string()
                });
                break;
            }
        }
    }

    notes
}
