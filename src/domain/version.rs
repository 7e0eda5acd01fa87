use crate::error::{ReleaseError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Semantic version representation
///
/// Ordering is lexicographic over `(major, minor, patch)`. A prerelease suffix
/// is carried through untouched; with equal triples the release sorts above
/// the prerelease.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<String>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Parse version from a tag string (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// A single leading `v` or `V` is accepted. The remainder must be a valid
    /// semver string; build metadata is dropped.
    pub fn parse(tag: &str) -> Result<Self> {
        let trimmed = tag.trim();
        let clean_tag = trimmed
            .strip_prefix(|c| c == 'v' || c == 'V')
            .unwrap_or(trimmed);

        let parsed = semver::Version::parse(clean_tag).map_err(|e| {
            ReleaseError::version(format!("Invalid version format: '{}' - {}", tag, e))
        })?;

        let pre = if parsed.pre.is_empty() {
            None
        } else {
            Some(parsed.pre.as_str().to_string())
        };

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre,
        })
    }

    /// Bump version according to bump type
    ///
    /// Any bump other than [`VersionBump::None`] produces a release version.
    /// Fails when the incremented component is already `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let increment = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                ReleaseError::version(format!(
                    "Cannot apply a {} bump to {}: component overflow",
                    bump_type, self
                ))
            })
        };

        Ok(match bump_type {
            VersionBump::None => self.clone(),
            VersionBump::Major => Version::new(increment(self.major)?, 0, 0),
            VersionBump::Minor => Version::new(self.major, increment(self.minor)?, 0),
            VersionBump::Patch => Version::new(self.major, self.minor, increment(self.patch)?),
        })
    }

    /// True while the public API is still considered unstable (`0.y.z`)
    pub fn is_pre_stable(&self) -> bool {
        self.major == 0
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.pre, &other.pre) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Version bump type decision, ordered by severity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn name(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }

    /// Downgrade applied while the version is below 1.0.0: a breaking
    /// change only moves the minor component. Other kinds are unchanged.
    pub fn dampened(self) -> Self {
        match self {
            VersionBump::Major => VersionBump::Minor,
            other => other,
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VersionBump {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(VersionBump::None),
            "patch" => Ok(VersionBump::Patch),
            "minor" => Ok(VersionBump::Minor),
            "major" => Ok(VersionBump::Major),
            other => Err(ReleaseError::version(format!(
                "Unknown bump kind '{}' (expected major, minor, patch or none)",
                other
            ))),
        }
    }
}

static BUMP_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^\s*(?:/|(\S+?):\s*)bump\s+(major|minor)\b").expect("valid regex literal")
});

/// A bump requested by a human, e.g. through a `/bump minor` comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManualBump {
    Major,
    Minor,
}

impl ManualBump {
    /// Extract a manual bump command from free text.
    ///
    /// Recognizes `/bump <kind>` and `<tool_name>: bump <kind>` on any line,
    /// where kind is `major` or `minor`. The first command found wins.
    pub fn from_command(text: &str, tool_name: &str) -> Option<Self> {
        BUMP_COMMAND
            .captures_iter(text)
            .find(|captures| {
                captures
                    .get(1)
                    .map_or(true, |prefix| prefix.as_str().eq_ignore_ascii_case(tool_name))
            })
            .and_then(|captures| captures.get(2))
            .and_then(|kind| kind.as_str().parse().ok())
    }

    /// Apply the command to `version`.
    ///
    /// `Minor` is a no-op when the version already sits on a minor boundary
    /// (`patch == 0`); `Major` is a no-op on a major boundary (`minor == 0 && patch == 0`).
    pub fn apply(self, version: &Version) -> Result<Version> {
        match self {
            ManualBump::Minor if version.patch == 0 => Ok(version.clone()),
            ManualBump::Major if version.minor == 0 && version.patch == 0 => Ok(version.clone()),
            ManualBump::Minor => version.bump(VersionBump::Minor),
            ManualBump::Major => version.bump(VersionBump::Major),
        }
    }
}

impl From<ManualBump> for VersionBump {
    fn from(manual: ManualBump) -> Self {
        match manual {
            ManualBump::Major => VersionBump::Major,
            ManualBump::Minor => VersionBump::Minor,
        }
    }
}

impl FromStr for ManualBump {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ManualBump::Major),
            "minor" => Ok(ManualBump::Minor),
            other => Err(ReleaseError::version(format!(
                "Manual bump must be 'major' or 'minor', got '{}'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("v1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
        assert_eq!(v.pre, None);
    }

    #[test]
    fn test_version_parse_without_v() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_uppercase_v() {
        let v = Version::parse("V1.2.3").unwrap();
        assert_eq!(v, Version::new(1, 2, 3));
    }

    #[test]
    fn test_version_parse_prerelease_passes_through() {
        let v = Version::parse("v2.0.0-beta.1").unwrap();
        assert_eq!(v.pre.as_deref(), Some("beta.1"));
        assert_eq!(v.to_string(), "2.0.0-beta.1");
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("v1.2.3.4").is_err());
        assert!(Version::parse("vv1.2.3").is_err());
        assert!(Version::parse("release").is_err());
    }

    #[test]
    fn test_version_bump() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(VersionBump::Major).unwrap(), Version::new(2, 0, 0));
        assert_eq!(v.bump(VersionBump::Minor).unwrap(), Version::new(1, 3, 0));
        assert_eq!(v.bump(VersionBump::Patch).unwrap(), Version::new(1, 2, 4));
        assert_eq!(v.bump(VersionBump::None).unwrap(), v);
    }

    #[test]
    fn test_version_bump_clears_prerelease() {
        let v = Version::parse("1.2.3-rc.1").unwrap();
        assert_eq!(v.bump(VersionBump::Patch).unwrap(), Version::new(1, 2, 4));
        assert_eq!(v.bump(VersionBump::None).unwrap(), v);
    }

    #[test]
    fn test_version_ordering() {
        assert!(Version::new(1, 2, 3) < Version::new(1, 2, 4));
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 9));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::parse("1.0.0-rc.1").unwrap() < Version::new(1, 0, 0));
    }

    #[test]
    fn test_version_default_is_zero() {
        assert_eq!(Version::default(), Version::new(0, 0, 0));
        assert_eq!(Version::default().to_string(), "0.0.0");
    }

    #[test]
    fn test_bump_order() {
        assert!(VersionBump::Major > VersionBump::Minor);
        assert!(VersionBump::Minor > VersionBump::Patch);
        assert!(VersionBump::Patch > VersionBump::None);
    }

    #[test]
    fn test_bump_overflow_is_an_error() {
        let v = Version::parse("v18446744073709551615.0.0").unwrap();
        assert_eq!(v.major, u64::MAX);
        assert!(matches!(v.bump(VersionBump::Major), Err(ReleaseError::Version(_))));
        assert_eq!(v.bump(VersionBump::Minor).unwrap(), Version::new(u64::MAX, 1, 0));

        let v = Version::new(1, u64::MAX, u64::MAX);
        assert!(v.bump(VersionBump::Minor).is_err());
        assert!(v.bump(VersionBump::Patch).is_err());
        assert_eq!(v.bump(VersionBump::Major).unwrap(), Version::new(2, 0, 0));
        assert!(ManualBump::Minor.apply(&v).is_err());
    }

    #[test]
    fn test_bump_dampened_only_lowers_major() {
        assert_eq!(VersionBump::Major.dampened(), VersionBump::Minor);
        assert_eq!(VersionBump::Minor.dampened(), VersionBump::Minor);
        assert_eq!(VersionBump::Patch.dampened(), VersionBump::Patch);
        assert_eq!(VersionBump::None.dampened(), VersionBump::None);
    }

    #[test]
    fn test_bump_from_str() {
        assert_eq!("Major".parse::<VersionBump>().unwrap(), VersionBump::Major);
        assert_eq!("none".parse::<VersionBump>().unwrap(), VersionBump::None);
        assert!("huge".parse::<VersionBump>().is_err());
    }

    #[test]
    fn test_manual_minor_is_noop_on_boundary() {
        let v = Version::new(1, 3, 0);
        assert_eq!(ManualBump::Minor.apply(&v).unwrap(), v);
    }

    #[test]
    fn test_manual_minor_bumps_off_boundary() {
        let v = Version::new(1, 2, 4);
        assert_eq!(ManualBump::Minor.apply(&v).unwrap(), Version::new(1, 3, 0));
    }

    #[test]
    fn test_manual_major_is_noop_on_boundary() {
        let v = Version::new(2, 0, 0);
        assert_eq!(ManualBump::Major.apply(&v).unwrap(), v);
    }

    #[test]
    fn test_manual_major_bumps_off_boundary() {
        assert_eq!(
            ManualBump::Major.apply(&Version::new(1, 3, 0)).unwrap(),
            Version::new(2, 0, 0)
        );
        assert_eq!(
            ManualBump::Major.apply(&Version::new(0, 9, 5)).unwrap(),
            Version::new(1, 0, 0)
        );
        assert_eq!(
            ManualBump::Major.apply(&Version::new(1, 0, 1)).unwrap(),
            Version::new(2, 0, 0)
        );
    }

    #[test]
    fn test_manual_bump_exhaustive_small_grid() {
        for major in 0..3 {
            for minor in 0..3 {
                for patch in 0..3 {
                    let v = Version::new(major, minor, patch);

                    let minor_result = ManualBump::Minor.apply(&v).unwrap();
                    if patch == 0 {
                        assert_eq!(minor_result, v);
                    } else {
                        assert_eq!(minor_result, Version::new(major, minor + 1, 0));
                    }

                    let major_result = ManualBump::Major.apply(&v).unwrap();
                    if minor == 0 && patch == 0 {
                        assert_eq!(major_result, v);
                    } else {
                        assert_eq!(major_result, Version::new(major + 1, 0, 0));
                    }
                }
            }
        }
    }

    #[test]
    fn test_manual_bump_from_command() {
        assert_eq!(
            ManualBump::from_command("/bump minor", "release-manager"),
            Some(ManualBump::Minor)
        );
        assert_eq!(
            ManualBump::from_command("Looks good.\n/bump MAJOR please", "release-manager"),
            Some(ManualBump::Major)
        );
        assert_eq!(
            ManualBump::from_command("release-manager: bump minor", "release-manager"),
            Some(ManualBump::Minor)
        );
    }

    #[test]
    fn test_manual_bump_from_command_skips_other_tools() {
        let text = "other-tool: bump major\nRelease-Manager: bump minor\n";
        assert_eq!(
            ManualBump::from_command(text, "release-manager"),
            Some(ManualBump::Minor)
        );
        assert_eq!(
            ManualBump::from_command(text, "other-tool"),
            Some(ManualBump::Major)
        );
    }

    #[test]
    fn test_manual_bump_from_command_rejects_other_text() {
        assert_eq!(ManualBump::from_command("/bump patch", "release-manager"), None);
        assert_eq!(ManualBump::from_command("please bump minor", "release-manager"), None);
        assert_eq!(ManualBump::from_command("other-tool: bump major", "release-manager"), None);
        assert_eq!(ManualBump::from_command("", "release-manager"), None);
    }
}
