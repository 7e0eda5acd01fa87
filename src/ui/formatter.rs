//! Pure formatting functions for UI output.
//!
//! Functions here only print; everything they show comes from the workflow result.

use console::style;

use crate::analyzer::BumpDecision;
use crate::boundary::BoundaryWarning;
use crate::domain::CommitRecord;
use crate::template::BatchReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    display_warning(&warning.to_string());
}

/// Truncate a commit header for one-line display
pub fn summarize_commit(commit: &CommitRecord) -> String {
    let header = commit.raw_message.lines().next().unwrap_or_default();
    if header.chars().count() > 60 {
        let short: String = header.chars().take(60).collect();
        format!("{}...", short)
    } else {
        header.to_string()
    }
}

/// Display the analyzed commits.
///
/// Shows up to 10 commits; the rest are counted.
pub fn display_commit_analysis(commits: &[CommitRecord], range: &str) {
    println!("\n{}", style(format!("Analyzing commits in {}", range)).bold());
    println!("{}", style(format!("{} commits:", commits.len())).underlined());

    for commit in commits.iter().take(10) {
        println!(
            "  {} {}",
            style(commit.short_hash()).dim(),
            summarize_commit(commit)
        );
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// Display the version decision.
///
/// Shows either:
/// - If releasing: "From: old_tag -> To: new_tag"
/// - Otherwise: the version that stays current
pub fn display_decision(decision: &BumpDecision, previous_tag: Option<&str>, new_tag: &str) {
    if !decision.is_release() {
        println!(
            "\n{} staying at {}",
            style("No release:").bold(),
            style(&decision.current_version).cyan()
        );
        return;
    }

    println!(
        "\n{} {} bump",
        style("Proposed Release:").bold(),
        decision.bump
    );
    if decision.detected != decision.bump {
        println!("  Commits alone suggest: {}", decision.detected);
    }
    match previous_tag {
        Some(old) => {
            println!("  From: {}", style(old).red());
            println!("  To:   {}", style(new_tag).green());
        }
        None => println!("  Initial tag: {}", style(new_tag).green()),
    }
}

/// Display what the rewrite engine did
pub fn display_batch_report(report: &BatchReport) {
    for path in &report.written {
        display_success(&format!("Updated {}", path.display()));
    }
    for path in &report.unchanged {
        println!("  {} {}", style("unchanged").dim(), path.display());
    }
    for warning in &report.warnings {
        display_boundary_warning(warning);
    }
}
