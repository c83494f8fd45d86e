//! git-credit - show the top contributors in surviving lines of code.

use anyhow::Result;
use clap::Parser;
use oddjobs::credit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Show the top contributors in surviving lines of code
///
/// Blames every tracked file and aggregates authorship per directory. The
/// result is cached in .git-credit.json; pass --invalidate to recompute.
#[derive(Parser, Debug)]
#[command(
    name = "git-credit",
    version,
    after_help = "\
Examples:
  git-credit                       Repository total
  git-credit 'src/*'               One table per direct child of src/
  git-credit --top 5 '*'           Top 5 contributors per top-level entry
  git-credit --invalidate --exclude vendor   Recompute, ignoring vendor/"
)]
struct Cli {
    /// Recompute contributions even if the cache file exists
    #[arg(long)]
    invalidate: bool,

    /// Exclude the given pathspec when computing contributions
    #[arg(long, value_name = "PATHSPEC")]
    exclude: Option<String>,

    /// Only show the top N contributors
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Show contributions matching the given glob patterns
    pathspecs: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    credit::run(&credit::Options {
        invalidate: cli.invalidate,
        exclude: cli.exclude,
        top: cli.top,
        pathspecs: cli.pathspecs,
    })
}
