use crate::boundary::BoundaryWarning;
use crate::domain::Version;
use crate::error::{ReleaseError, Result};
use regex::Regex;

/// Tag naming pattern (e.g., "v{version}", "release-{version}")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPattern {
    pub pattern: String,
}

/// The newest version tag found in a repository
#[derive(Debug, Clone, PartialEq)]
pub struct LatestTag {
    pub name: String,
    pub version: Version,
}

impl TagPattern {
    /// Create a new tag pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        TagPattern {
            pattern: pattern.into(),
        }
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version="1.2.3" -> "v1.2.3"
    pub fn format(&self, version: &Version) -> String {
        self.pattern.replace("{version}", &version.to_string())
    }

    /// Regex capturing the version-shaped part between the pattern's prefix and suffix
    fn slot_regex(&self) -> Result<Regex> {
        let (prefix, suffix) = self.pattern.split_once("{version}").ok_or_else(|| {
            ReleaseError::tag("Pattern must contain {version} placeholder")
        })?;

        let escaped = format!(
            "^{}(.+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        );
        Regex::new(&escaped)
            .map_err(|e| ReleaseError::tag(format!("Invalid pattern '{}': {}", self.pattern, e)))
    }

    fn version_slot<'a>(re: &Regex, tag: &'a str) -> Option<&'a str> {
        re.captures(tag)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }

    /// Validate if a tag matches this pattern with a parsable version
    pub fn matches(&self, tag: &str) -> Result<bool> {
        let re = self.slot_regex()?;
        Ok(Self::version_slot(&re, tag)
            .map(|slot| Version::parse(slot).is_ok())
            .unwrap_or(false))
    }

    /// Extract the version of a matching tag
    pub fn extract_version(&self, tag: &str) -> Result<Option<Version>> {
        let re = self.slot_regex()?;
        match Self::version_slot(&re, tag) {
            Some(slot) => Version::parse(slot).map(Some),
            None => Ok(None),
        }
    }

    /// Find the highest version among `tags`.
    ///
    /// Tags outside the pattern are ignored silently; tags that fit the
    /// pattern but hold no valid version are reported as warnings.
    pub fn latest(&self, tags: &[String]) -> Result<(Option<LatestTag>, Vec<BoundaryWarning>)> {
        let re = self.slot_regex()?;
        let mut latest: Option<LatestTag> = None;
        let mut warnings = Vec::new();

        for tag in tags {
            let slot = match Self::version_slot(&re, tag) {
                Some(slot) => slot,
                None => continue,
            };

            match Version::parse(slot) {
                Ok(version) => {
                    if latest.as_ref().map_or(true, |l| version > l.version) {
                        latest = Some(LatestTag {
                            name: tag.clone(),
                            version,
                        });
                    }
                }
                Err(e) => warnings.push(BoundaryWarning::UnparsableTag {
                    tag: tag.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        Ok((latest, warnings))
    }
}

impl Default for TagPattern {
    fn default() -> Self {
        TagPattern::new("v{version}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_pattern_format() {
        let pattern = TagPattern::new("v{version}");
        assert_eq!(pattern.format(&Version::new(1, 2, 3)), "v1.2.3");
    }

    #[test]
    fn test_pattern_format_with_suffix() {
        let pattern = TagPattern::new("release-{version}-final");
        assert_eq!(
            pattern.format(&Version::new(1, 2, 3)),
            "release-1.2.3-final"
        );
    }

    #[test]
    fn test_pattern_matches() {
        let pattern = TagPattern::new("v{version}");
        assert!(pattern.matches("v1.2.3").unwrap());
        assert!(!pattern.matches("release-1.2.3").unwrap());
        assert!(!pattern.matches("v1.2").unwrap());
    }

    #[test]
    fn test_pattern_without_placeholder_is_rejected() {
        let pattern = TagPattern::new("release");
        assert!(pattern.matches("release").is_err());
    }

    #[test]
    fn test_pattern_with_regex_metacharacters() {
        let pattern = TagPattern::new("rel.(app)+{version}");
        assert!(pattern.matches("rel.(app)+1.2.3").unwrap());
        assert!(!pattern.matches("relx(app)+1.2.3").unwrap());
        assert!(TagPattern::new("release").latest(&[]).is_err());
    }

    #[test]
    fn test_extract_version() {
        let pattern = TagPattern::new("app-v{version}");
        assert_eq!(
            pattern.extract_version("app-v0.4.0").unwrap(),
            Some(Version::new(0, 4, 0))
        );
        assert_eq!(pattern.extract_version("lib-v0.4.0").unwrap(), None);
        assert!(pattern.extract_version("app-vnext").is_err());
    }

    #[test]
    fn test_latest_picks_highest_version_not_last_name() {
        let pattern = TagPattern::default();
        let (latest, warnings) = pattern
            .latest(&tags(&["v1.9.0", "v1.10.0", "v1.2.0", "other"]))
            .unwrap();

        let latest = latest.unwrap();
        assert_eq!(latest.name, "v1.10.0");
        assert_eq!(latest.version, Version::new(1, 10, 0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_latest_reports_unparsable_tags() {
        let pattern = TagPattern::default();
        let (latest, warnings) = pattern.latest(&tags(&["vnext", "v0.1.0"])).unwrap();

        assert_eq!(latest.unwrap().version, Version::new(0, 1, 0));
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            BoundaryWarning::UnparsableTag { tag, .. } if tag == "vnext"
        ));
    }

    #[test]
    fn test_latest_none_without_tags() {
        let (latest, warnings) = TagPattern::default().latest(&[]).unwrap();
        assert!(latest.is_none());
        assert!(warnings.is_empty());
    }
}
