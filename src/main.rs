use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use release_manager::cli::{run_release_workflow, ReleaseOutcome, ReleaseWorkflowArgs};
use release_manager::config;
use release_manager::domain::{ManualBump, Version, VersionBump};
use release_manager::fs::LocalFileSystem;
use release_manager::git::Git2Repository;
use release_manager::ui;

#[derive(clap::Parser)]
#[command(
    name = "release-manager",
    about = "Decide the next version from conventional commits and render versioned files"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Start of the commit range (default: latest version tag)")]
    from: Option<String>,

    #[arg(long, help = "End of the commit range (default: release.branch)")]
    to: Option<String>,

    #[arg(long, help = "Force the bump kind: major, minor, patch or none")]
    release_as: Option<VersionBump>,

    #[arg(long, help = "Text of a bump command, e.g. \"/bump major\"")]
    bump_command: Option<String>,

    #[arg(long, help = "Current version, instead of reading it from tags")]
    current_version: Option<Version>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,

    #[arg(short, long, help = "Create the version tag after rendering files")]
    tag: bool,

    #[arg(short, long, help = "Skip confirmation prompts")]
    force: bool,

    #[arg(long, help = "Write the changelog to this file instead of stdout")]
    changelog: Option<PathBuf>,

    #[arg(short, long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if args.version {
        println!("release-manager {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let manual_bump = match &args.bump_command {
        Some(text) => {
            let parsed = ManualBump::from_command(text, &config.files.tool_name);
            if parsed.is_none() {
                ui::display_warning(&format!("Ignoring unrecognized bump command: {}", text));
            }
            parsed
        }
        None => None,
    };

    let repo = Git2Repository::open(".").context("Git repository error")?;
    let fs = LocalFileSystem::new();

    let mut workflow_args = ReleaseWorkflowArgs {
        from: args.from.clone(),
        to: args.to.clone(),
        current_version: args.current_version.clone(),
        release_as: args.release_as,
        manual_bump,
        dry_run: true,
        create_tag: args.tag,
    };

    ui::display_status("Analyzing commits...");
    let plan = run_release_workflow(&repo, &fs, &config, &workflow_args)?;

    for warning in &plan.warnings {
        ui::display_boundary_warning(warning);
    }
    let range = match &plan.previous_tag {
        Some(tag) => format!("{}..{}", tag, args.to.as_deref().unwrap_or(&config.release.branch)),
        None => args.to.clone().unwrap_or_else(|| config.release.branch.clone()),
    };
    ui::display_commit_analysis(&plan.commits, &range);
    ui::display_decision(&plan.decision, plan.previous_tag.as_deref(), &plan.tag);

    if plan.outcome == ReleaseOutcome::Idle {
        return Ok(());
    }

    emit_changelog(&plan.changelog, args.changelog.as_ref())?;

    if args.dry_run {
        ui::display_status("Dry run: no files written, no tag created");
        return Ok(());
    }

    let prompt = if args.tag {
        format!("Render files and create tag {}?", plan.tag)
    } else {
        format!("Render files for {}?", plan.tag)
    };
    if !args.force && !ui::confirm_action(&prompt)? {
        println!("Operation cancelled by user.");
        return Ok(());
    }

    workflow_args.dry_run = false;
    let result = run_release_workflow(&repo, &fs, &config, &workflow_args)?;
    ui::display_batch_report(&result.files);

    match result.outcome {
        ReleaseOutcome::Tagged => ui::display_success(&format!("Created tag: {}", result.tag)),
        _ => ui::display_success(&format!("Rendered files for {}", result.tag)),
    }

    Ok(())
}

fn emit_changelog(changelog: &str, path: Option<&PathBuf>) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, changelog)
                .with_context(|| format!("Failed to write changelog to {}", path.display()))?;
            ui::display_success(&format!("Wrote changelog to {}", path.display()));
        }
        None => println!("\n{}", changelog),
    }
    Ok(())
}
