use crate::config::ConventionalCommitsConfig;
use crate::domain::{CommitRecord, ManualBump, Version, VersionBump};
use crate::error::Result;
use crate::git::Repository;
use git2::Oid;

/// Outcome of the version decision for one release run.
///
/// `new_version == current_version` exactly when `bump` is [`VersionBump::None`].
#[derive(Debug, Clone, PartialEq)]
pub struct BumpDecision {
    /// Effective bump after override, dampening and manual commands
    pub bump: VersionBump,
    /// Highest bump found in the analyzed commits
    pub detected: VersionBump,
    pub current_version: Version,
    pub new_version: Version,
}

impl BumpDecision {
    pub fn is_release(&self) -> bool {
        self.bump != VersionBump::None
    }

    /// Apply a human bump command to the pending release version.
    ///
    /// The command takes precedence over the commit-derived decision; when its
    /// idempotence guard makes it a no-op the decision is returned unchanged.
    pub fn with_manual_bump(self, manual: ManualBump) -> Result<Self> {
        let new_version = manual.apply(&self.new_version)?;
        if new_version == self.new_version {
            return Ok(self);
        }

        Ok(BumpDecision {
            bump: manual.into(),
            new_version,
            ..self
        })
    }
}

/// Analyzes commits to determine version bump type
pub struct VersionAnalyzer {
    config: ConventionalCommitsConfig,
}

impl VersionAnalyzer {
    /// Create a new version analyzer
    pub fn new(config: ConventionalCommitsConfig) -> Self {
        VersionAnalyzer { config }
    }

    /// Read and parse the commits of a repository range (`from` exclusive, oldest first)
    pub fn load_commits<R: Repository>(
        &self,
        repo: &R,
        from_oid: Option<Oid>,
        to_oid: Oid,
    ) -> Result<Vec<CommitRecord>> {
        let commits = repo.get_commits_between(from_oid, to_oid)?;
        Ok(commits
            .into_iter()
            .map(|c| {
                CommitRecord::parse(
                    c.hash,
                    &c.message,
                    &self.config.breaking_change_indicators,
                )
            })
            .collect())
    }

    /// Bump implied by a single commit; breaking changes win over the type
    pub fn classify_commit(&self, commit: &CommitRecord) -> VersionBump {
        let is_in = |set: &[String]| set.iter().any(|t| *t == commit.r#type);

        if commit.is_breaking() {
            VersionBump::Major
        } else if is_in(&self.config.minor_types) {
            VersionBump::Minor
        } else if is_in(&self.config.patch_types) {
            VersionBump::Patch
        } else {
            // listed types and unknown types alike
            VersionBump::None
        }
    }

    /// Commits left out of both the changelog and the bump.
    ///
    /// Exclusion is checked before classification, so an excluded breaking
    /// commit (`chore!: ...`) contributes nothing.
    pub fn is_excluded(&self, commit: &CommitRecord) -> bool {
        self.config
            .excluded_types
            .iter()
            .any(|t| *t == commit.r#type)
            || commit
                .scope
                .as_ref()
                .is_some_and(|scope| self.config.excluded_scopes.contains(scope))
    }

    /// True when the commit type is listed in the changelog without bumping
    pub fn is_listed(&self, commit: &CommitRecord) -> bool {
        self.config.listed_types.iter().any(|t| *t == commit.r#type)
    }

    /// Commits that take part in the release
    pub fn included<'a>(&self, commits: &'a [CommitRecord]) -> Vec<&'a CommitRecord> {
        commits.iter().filter(|c| !self.is_excluded(c)).collect()
    }

    /// Highest bump among the non-excluded commits
    pub fn aggregate_bump(&self, commits: &[CommitRecord]) -> VersionBump {
        commits
            .iter()
            .filter(|c| !self.is_excluded(c))
            .map(|c| self.classify_commit(c))
            .max()
            .unwrap_or(VersionBump::None)
    }

    /// Decide the next version.
    ///
    /// `release_as` replaces the analyzed kind unconditionally. Below 1.0.0 a
    /// major bump is dampened to minor, judged on `current`, so automatic bumps
    /// never leave the 0.x range. Fails only when a version component would
    /// overflow.
    pub fn determine_version_bump(
        &self,
        commits: &[CommitRecord],
        current: &Version,
        release_as: Option<VersionBump>,
    ) -> Result<BumpDecision> {
        let detected = self.aggregate_bump(commits);
        let kind = release_as.unwrap_or(detected);

        let bump = if current.is_pre_stable() {
            kind.dampened()
        } else {
            kind
        };

        Ok(BumpDecision {
            bump,
            detected,
            current_version: current.clone(),
            new_version: current.bump(bump)?,
        })
    }
}
