//! User-facing output.
//!
//! Diagnostics go through `tracing`; everything the user is meant to read
//! goes through these helpers.

use console::style;

use crate::cli::BumpOutcome;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One-line summary of a finished run, naming both versions.
pub fn bump_summary(outcome: &BumpOutcome) -> String {
    if outcome.committed {
        format!(
            "Version bumped from {} to {} and committed",
            outcome.previous, outcome.current
        )
    } else {
        format!(
            "Dry run: would bump {} from {} to {} and commit \"{}\"",
            outcome.path.display(),
            outcome.previous,
            outcome.current,
            outcome.commit_message
        )
    }
}

pub fn display_outcome(outcome: &BumpOutcome) {
    if outcome.committed {
        display_success(&bump_summary(outcome));
    } else {
        display_status(&bump_summary(outcome));
    }
}
