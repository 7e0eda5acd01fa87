//! Markdown changelog generation from analyzed commits

use crate::analyzer::VersionAnalyzer;
use crate::domain::{CommitRecord, VersionBump};
use std::collections::BTreeMap;

/// Changelog sections, in rendering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Features,
    BugFixes,
    Performance,
    Refactoring,
    Documentation,
    Style,
    Tests,
    Ci,
    Build,
    Other,
}

impl Section {
    pub fn for_type(commit_type: &str) -> Self {
        match commit_type {
            "feat" => Section::Features,
            "fix" => Section::BugFixes,
            "perf" => Section::Performance,
            "refactor" => Section::Refactoring,
            "docs" => Section::Documentation,
            "style" => Section::Style,
            "test" => Section::Tests,
            "ci" => Section::Ci,
            "build" => Section::Build,
            _ => Section::Other,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Section::Features => "Features",
            Section::BugFixes => "Bug Fixes",
            Section::Performance => "Performance Improvements",
            Section::Refactoring => "Code Refactoring",
            Section::Documentation => "Documentation",
            Section::Style => "Styles",
            Section::Tests => "Tests",
            Section::Ci => "Continuous Integration",
            Section::Build => "Build System",
            Section::Other => "Other Changes",
        }
    }
}

/// One changelog line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub scope: Option<String>,
    pub text: String,
    pub short_hash: String,
}

impl Entry {
    fn new(commit: &CommitRecord, text: &str) -> Self {
        Entry {
            scope: commit.scope.clone(),
            text: text.to_string(),
            short_hash: commit.short_hash().to_string(),
        }
    }

    fn to_markdown(&self) -> String {
        let scope = self
            .scope
            .as_ref()
            .map(|s| format!("**{}:** ", s))
            .unwrap_or_default();
        format!("- {}{} ({})\n", scope, self.text, self.short_hash)
    }
}

/// Changelog for one release
#[derive(Debug, Clone, PartialEq)]
pub struct Changelog {
    /// Heading, usually the new tag
    pub title: String,
    pub breaking: Vec<Entry>,
    pub sections: BTreeMap<Section, Vec<Entry>>,
}

impl Changelog {
    /// Collect the commits that take part in the release
    pub fn build(
        title: impl Into<String>,
        commits: &[CommitRecord],
        analyzer: &VersionAnalyzer,
    ) -> Self {
        let mut changelog = Changelog {
            title: title.into(),
            breaking: Vec::new(),
            sections: BTreeMap::new(),
        };

        for commit in analyzer.included(commits) {
            if commit.breaking_notes.is_empty() && commit.has_breaking_marker {
                changelog.breaking.push(Entry::new(commit, &commit.subject));
            }
            for note in &commit.breaking_notes {
                changelog.breaking.push(Entry::new(commit, note));
            }

            // Non-bumping types get their own section only when listed
            let section = if analyzer.is_listed(commit)
                || analyzer.classify_commit(commit) != VersionBump::None
            {
                Section::for_type(&commit.r#type)
            } else {
                Section::Other
            };
            changelog
                .sections
                .entry(section)
                .or_default()
                .push(Entry::new(commit, &commit.subject));
        }

        changelog
    }

    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty() && self.sections.is_empty()
    }

    /// Render as markdown
    pub fn to_markdown(&self) -> String {
        let mut output = format!("## {}\n\n", self.title);

        if self.is_empty() {
            output.push_str("No notable changes.\n");
            return output;
        }

        if !self.breaking.is_empty() {
            output.push_str("### Breaking Changes\n\n");
            for entry in &self.breaking {
                output.push_str(&entry.to_markdown());
            }
            output.push('\n');
        }

        for (section, entries) in &self.sections {
            output.push_str(&format!("### {}\n\n", section.title()));
            for entry in entries {
                output.push_str(&entry.to_markdown());
            }
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConventionalCommitsConfig;

    fn record(hash: &str, message: &str) -> CommitRecord {
        CommitRecord::parse_default(hash, message)
    }

    fn analyzer() -> VersionAnalyzer {
        VersionAnalyzer::new(ConventionalCommitsConfig::default())
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let commits = vec![
            record("1111111aaaa", "docs: explain markers"),
            record("2222222bbbb", "fix(parser): handle CRLF"),
            record("3333333cccc", "feat(cli): add --dry-run"),
        ];

        let markdown = Changelog::build("v0.2.0", &commits, &analyzer()).to_markdown();

        assert_eq!(
            markdown,
            "## v0.2.0\n\n\
             ### Features\n\n- **cli:** add --dry-run (3333333)\n\n\
             ### Bug Fixes\n\n- **parser:** handle CRLF (2222222)\n\n\
             ### Documentation\n\n- explain markers (1111111)\n\n"
        );
    }

    #[test]
    fn test_excluded_commits_are_omitted() {
        let commits = vec![
            record("1111111", "chore: bump deps"),
            record("2222222", "feat(no-release): hidden"),
            record("3333333", "fix: visible"),
        ];

        let changelog = Changelog::build("v1.0.1", &commits, &analyzer());
        assert_eq!(changelog.sections.len(), 1);
        assert_eq!(changelog.sections[&Section::BugFixes].len(), 1);
    }

    #[test]
    fn test_breaking_changes_listed_first() {
        let commits = vec![
            record("1111111", "feat(api)!: new response format"),
            record("2222222", "fix: rename\n\nBREAKING CHANGE: `id` is now `uuid`"),
        ];

        let markdown = Changelog::build("v2.0.0", &commits, &analyzer()).to_markdown();
        let breaking_at = markdown.find("### Breaking Changes").unwrap();
        let features_at = markdown.find("### Features").unwrap();
        assert!(breaking_at < features_at);
        assert!(markdown.contains("- **api:** new response format (1111111)"));
        assert!(markdown.contains("- `id` is now `uuid` (2222222)"));
    }

    #[test]
    fn test_non_conventional_commits_go_to_other() {
        let commits = vec![record("1111111", "Update README")];
        let changelog = Changelog::build("v1.0.0", &commits, &analyzer());
        assert!(changelog.sections.contains_key(&Section::Other));
    }

    #[test]
    fn test_unlisted_types_go_to_other() {
        let mut config = ConventionalCommitsConfig::default();
        config.listed_types = vec!["docs".to_string()];
        let analyzer = VersionAnalyzer::new(config);
        let commits = vec![
            record("1111111", "ci: cache cargo registry"),
            record("2222222", "docs: usage"),
            record("3333333", "perf: faster scan"),
        ];

        let changelog = Changelog::build("v1.0.1", &commits, &analyzer);

        assert!(!changelog.sections.contains_key(&Section::Ci));
        assert_eq!(changelog.sections[&Section::Other][0].text, "cache cargo registry");
        assert_eq!(changelog.sections[&Section::Documentation].len(), 1);
        assert_eq!(changelog.sections[&Section::Performance].len(), 1);
    }

    #[test]
    fn test_empty_changelog() {
        let markdown = Changelog::build("v1.0.0", &[], &analyzer()).to_markdown();
        assert_eq!(markdown, "## v1.0.0\n\nNo notable changes.\n");
    }
}
