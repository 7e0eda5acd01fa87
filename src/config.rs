use crate::domain::{TagPattern, VersionBump};
use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "release-manager.toml";

/// Represents the complete configuration for release-manager.
///
/// Contains release settings, the files to rewrite, and the conventional commit rules.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub files: FilesConfig,

    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

fn default_branch() -> String {
    "HEAD".to_string()
}

/// Release-level settings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Tag naming pattern, must contain `{version}`
    #[serde(default = "default_tag_pattern")]
    pub tag_pattern: String,

    /// Reference whose history is released
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Forces the bump kind regardless of the analyzed commits
    #[serde(default)]
    pub release_as: Option<VersionBump>,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            tag_pattern: default_tag_pattern(),
            branch: default_branch(),
            release_as: None,
        }
    }
}

impl ReleaseConfig {
    pub fn tag_pattern(&self) -> TagPattern {
        TagPattern::new(self.tag_pattern.clone())
    }
}

fn default_tool_name() -> String {
    "release-manager".to_string()
}

/// Files rewritten on every release.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Identifier inside the `%%<tool_name>:` opening marker
    #[serde(default = "default_tool_name")]
    pub tool_name: String,

    /// Files carrying in-line marker regions
    #[serde(default)]
    pub version_files: Vec<String>,

    /// Whole-file templates rendered to a derived output path
    #[serde(default)]
    pub template_files: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        FilesConfig {
            tool_name: default_tool_name(),
            version_files: Vec::new(),
            template_files: Vec::new(),
        }
    }
}

fn default_minor_types() -> Vec<String> {
    strings(&["feat"])
}

fn default_patch_types() -> Vec<String> {
    strings(&["fix", "perf", "refactor"])
}

fn default_listed_types() -> Vec<String> {
    strings(&["docs", "style", "test", "ci", "build"])
}

fn default_excluded_types() -> Vec<String> {
    strings(&["chore"])
}

fn default_excluded_scopes() -> Vec<String> {
    strings(&["no-release"])
}

fn default_breaking_change_indicators() -> Vec<String> {
    strings(crate::domain::commit::DEFAULT_BREAKING_INDICATORS)
}

/// Configuration for conventional commit analysis.
///
/// Defines which commit types bump which version component, which commits
/// are left out of the release, and the footers that flag breaking changes.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    /// Listed in the changelog without bumping
    #[serde(default = "default_listed_types")]
    pub listed_types: Vec<String>,

    #[serde(default = "default_excluded_types")]
    pub excluded_types: Vec<String>,

    #[serde(default = "default_excluded_scopes")]
    pub excluded_scopes: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
            listed_types: default_listed_types(),
            excluded_types: default_excluded_types(),
            excluded_scopes: default_excluded_scopes(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

impl Config {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the engines rely on. Runs once, at load time.
    pub fn validate(&self) -> Result<()> {
        let tool_name = &self.files.tool_name;
        if tool_name.is_empty() {
            return Err(ReleaseError::config("files.tool_name must not be empty"));
        }
        if tool_name
            .chars()
            .any(|c| c == '%' || c == ':' || c.is_whitespace())
        {
            return Err(ReleaseError::config(format!(
                "files.tool_name '{}' must not contain '%', ':' or whitespace",
                tool_name
            )));
        }

        if !self.release.tag_pattern.contains("{version}") {
            return Err(ReleaseError::config(format!(
                "release.tag_pattern '{}' must contain the {{version}} placeholder",
                self.release.tag_pattern
            )));
        }

        if self.release.branch.trim().is_empty() {
            return Err(ReleaseError::config("release.branch must not be empty"));
        }

        if self
            .conventional_commits
            .breaking_change_indicators
            .iter()
            .any(|indicator| indicator.trim().is_empty())
        {
            return Err(ReleaseError::config(
                "conventional_commits.breaking_change_indicators must not contain empty entries",
            ));
        }

        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-manager.toml` in current directory
/// 3. `.release-manager.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed, or validated
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_release_as_parses_lowercase() {
        let config = Config::from_toml("[release]\nrelease_as = \"major\"\n").unwrap();
        assert_eq!(config.release.release_as, Some(VersionBump::Major));
    }

    #[test]
    fn test_tool_name_with_marker_punctuation_is_rejected() {
        for bad in ["", "tool:name", "100%", "my tool"] {
            let mut config = Config::default();
            config.files.tool_name = bad.to_string();
            assert!(config.validate().is_err(), "'{}' should be rejected", bad);
        }
    }

    #[test]
    fn test_tag_pattern_requires_placeholder() {
        let result = Config::from_toml("[release]\ntag_pattern = \"release\"\n");
        assert!(matches!(result, Err(ReleaseError::Config(_))));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = Config::from_toml("[files]\nversion_file = [\"a.go\"]\n");
        assert!(matches!(result, Err(ReleaseError::Toml(_))));
    }
}
