use std::fmt::Display;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use bump_version::cli::run_bump_workflow;
use bump_version::config::{self, CliOverrides};
use bump_version::git::Backend;
use bump_version::{telemetry, ui};

#[derive(clap::Parser)]
#[command(
    name = "bump-version",
    version,
    about = "Bump the semantic version stored in a file and commit the change"
)]
struct Args {
    #[arg(value_name = "FILE", help = "Version file to bump [default: VERSION]")]
    file: Option<PathBuf>,

    #[arg(long, help = "Bump major version")]
    major: bool,

    #[arg(long, help = "Bump minor version")]
    minor: bool,

    #[arg(
        long,
        value_name = "NAME",
        help = "Name of the main branch, where bumps are refused [default: main]"
    )]
    main_branch: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        long,
        value_name = "BACKEND",
        help = "Git access method: 'cli' or 'libgit2' [default: cli]"
    )]
    backend: Option<Backend>,

    #[arg(long, help = "Preview the new version without writing or committing")]
    dry_run: bool,

    #[arg(short, long, help = "Print diagnostic logs to stderr")]
    verbose: bool,
}

fn fail(err: impl Display) -> ! {
    ui::display_error(&err.to_string());
    std::process::exit(1);
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init_tracing(telemetry::level_for(args.verbose));

    let config = config::load_config(args.config.as_deref()).unwrap_or_else(|e| fail(e));

    let overrides = CliOverrides {
        file: args.file,
        main_branch: args.main_branch,
        backend: args.backend,
        major: args.major,
        minor: args.minor,
        dry_run: args.dry_run,
    };
    let (bump_config, backend) = config.resolve(overrides).unwrap_or_else(|e| fail(e));

    let workdir = std::env::current_dir()
        .unwrap_or_else(|e| fail(format!("Cannot determine current directory: {}", e)));
    let repo = backend.open(workdir);

    match run_bump_workflow(&bump_config, repo.as_ref()) {
        Ok(outcome) => ui::display_outcome(&outcome),
        Err(e) => fail(e),
    }

    Ok(())
}
