//! starlog - stargazers per time interval for a GitHub repository.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use oddjobs::stars::{self, aggregate, report, PageCache, StargazerClient};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Display stargazers per time interval for a GitHub repository
///
/// Pages are cached on disk and revalidated with ETags, so repeated runs
/// only download what changed. A supplied token is remembered.
#[derive(Parser, Debug)]
#[command(
    name = "starlog",
    version,
    after_help = "\
Examples:
  starlog rust-lang/rust                 Stars per day, as a table
  starlog rust-lang/rust -i week --plot  Stars per week, as a bar chart
  starlog rust-lang/rust --cache         Offline: reuse cached pages"
)]
struct Cli {
    /// GitHub repository as OWNER/NAME
    repository: String,

    /// Aggregation interval: Y/year, m/month, w/week, d/day, H/hour,
    /// M/minute, S/second (default: day)
    #[arg(short, long, value_name = "INTERVAL")]
    interval: Option<String>,

    /// Render a bar chart instead of a table
    #[arg(long)]
    plot: bool,

    /// Serve pages from the local cache without revalidation
    #[arg(long)]
    cache: bool,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let interval = aggregate::parse_interval(cli.interval.as_deref());

    let page_cache = PageCache::open_default();
    let token = stars::resolve_token(cli.token, &page_cache)?;
    let client = StargazerClient::new(token);

    let dates = stars::fetch_star_dates(&client, &page_cache, &cli.repository, cli.cache)?;
    let counts = aggregate::aggregate(&dates, interval, Utc::now());

    let rendered = if cli.plot {
        report::render_chart(&counts, &cli.repository, interval)
    } else {
        report::render_table(&counts, &cli.repository, interval)
    };
    print!("{rendered}");

    Ok(())
}
