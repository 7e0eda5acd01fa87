//! Main release workflow orchestration logic
//!
//! Wires the decision engine and the template engine to the repository and
//! file system collaborators. Kept apart from clap so it can be driven
//! programmatically and tested against mocks.

use crate::analyzer::{BumpDecision, VersionAnalyzer};
use crate::boundary::BoundaryWarning;
use crate::changelog::Changelog;
use crate::config::Config;
use crate::domain::{CommitRecord, ManualBump, Version, VersionBump};
use crate::error::{ReleaseError, Result};
use crate::fs::FileSystem;
use crate::git::Repository;
use crate::template::{
    process_template_files, process_version_files, BatchReport, Markers, RenderContext,
};
use std::path::PathBuf;

/// Arguments for the release workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseWorkflowArgs {
    /// Start of the commit range (exclusive); defaults to the latest version tag
    pub from: Option<String>,

    /// End of the commit range (inclusive); defaults to `release.branch`
    pub to: Option<String>,

    /// Overrides the version read from tags
    pub current_version: Option<Version>,

    /// Overrides `release.release_as`
    pub release_as: Option<VersionBump>,

    /// Human bump command, applied after commit analysis
    pub manual_bump: Option<ManualBump>,

    /// Decide and render the changelog only
    pub dry_run: bool,

    /// Create the version tag at the end of the range
    pub create_tag: bool,
}

/// Where the run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Nothing to release
    Idle,
    /// Dry run: a release was decided but nothing was written
    Planned,
    /// Version and template files were rendered
    FilesRendered,
    /// Files were rendered and the version tag was created
    Tagged,
}

/// Result of a release workflow run
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub decision: BumpDecision,
    pub previous_tag: Option<String>,
    /// Tag name for the new version
    pub tag: String,
    pub commits: Vec<CommitRecord>,
    pub changelog: String,
    pub files: BatchReport,
    /// Repository-level warnings; file warnings live in `files`
    pub warnings: Vec<BoundaryWarning>,
    pub outcome: ReleaseOutcome,
}

/// Main release workflow
///
/// 1. Resolve the commit range and the current version from tags
/// 2. Analyze commits and decide the version bump
/// 3. Apply the manual bump command, if any
/// 4. Render the changelog
/// 5. Rewrite version files and render template files
/// 6. Optionally create the version tag
pub fn run_release_workflow<R, F>(
    repo: &R,
    fs: &F,
    config: &Config,
    args: &ReleaseWorkflowArgs,
) -> Result<WorkflowResult>
where
    R: Repository,
    F: FileSystem,
{
    let pattern = config.release.tag_pattern();
    let to_ref = args.to.as_deref().unwrap_or(&config.release.branch);
    let head = repo.resolve_reference(to_ref)?;

    let tags = repo.list_tags()?;
    let (latest, mut warnings) = pattern.latest(&tags)?;

    let current_version = args
        .current_version
        .clone()
        .or_else(|| latest.as_ref().map(|l| l.version.clone()))
        .unwrap_or_default();

    let from_oid = match (&args.from, &latest) {
        (Some(from), _) => Some(repo.resolve_reference(from)?),
        (None, Some(latest)) => repo.find_tag_oid(&latest.name)?,
        (None, None) => None,
    };

    let analyzer = VersionAnalyzer::new(config.conventional_commits.clone());
    let commits = analyzer.load_commits(repo, from_oid, head)?;

    if commits.is_empty() {
        if let Some(latest) = &latest {
            warnings.push(BoundaryWarning::NoNewCommits {
                latest_tag: latest.name.clone(),
                current_commit_hash: head.to_string(),
            });
        }
    }

    let release_as = args.release_as.or(config.release.release_as);
    let mut decision = analyzer.determine_version_bump(&commits, &current_version, release_as)?;
    if let Some(manual) = args.manual_bump {
        decision = decision.with_manual_bump(manual)?;
    }

    let tag = pattern.format(&decision.new_version);
    let changelog = Changelog::build(tag.clone(), &commits, &analyzer).to_markdown();

    let mut result = WorkflowResult {
        decision,
        previous_tag: latest.map(|l| l.name),
        tag,
        commits,
        changelog,
        files: BatchReport::default(),
        warnings,
        outcome: ReleaseOutcome::Idle,
    };

    if !result.decision.is_release() {
        return Ok(result);
    }
    if args.dry_run {
        result.outcome = ReleaseOutcome::Planned;
        return Ok(result);
    }

    result.files = render_files(fs, config, &result.decision.new_version)?;
    result.outcome = ReleaseOutcome::FilesRendered;

    if args.create_tag {
        if repo.find_tag_oid(&result.tag)?.is_some() {
            return Err(ReleaseError::tag(format!(
                "Tag '{}' already exists",
                result.tag
            )));
        }
        repo.create_tag(&result.tag, head)?;
        result.outcome = ReleaseOutcome::Tagged;
    }

    Ok(result)
}

/// Run both rewrite modes. A write failure reports progress across both
/// batches: version files already written, and template files never attempted.
fn render_files<F: FileSystem>(fs: &F, config: &Config, version: &Version) -> Result<BatchReport> {
    let ctx = RenderContext::new(version);
    let markers = Markers::new(&config.files.tool_name);

    let version_report =
        match process_version_files(fs, &config.files.version_files, &markers, &ctx) {
            Ok(report) => report,
            Err(ReleaseError::BatchWrite {
                failed,
                written,
                mut pending,
                source,
            }) => {
                pending.extend(config.files.template_files.iter().map(PathBuf::from));
                return Err(ReleaseError::BatchWrite {
                    failed,
                    written,
                    pending,
                    source,
                });
            }
            Err(e) => return Err(e),
        };

    match process_template_files(fs, &config.files.template_files, &ctx) {
        Ok(template_report) => Ok(version_report.merge(template_report)),
        Err(ReleaseError::BatchWrite {
            failed,
            written,
            pending,
            source,
        }) => {
            let mut all_written = version_report.written;
            all_written.extend(written);
            Err(ReleaseError::BatchWrite {
                failed,
                written: all_written,
                pending,
                source,
            })
        }
        Err(e) => Err(e),
    }
}
