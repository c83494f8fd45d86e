//! Surviving lines of code per author, aggregated per directory.
//!
//! `git-credit` walks every tracked file, blames it, and credits each
//! surviving line to its author under every ancestor directory of the file.
//! The result is cached as JSON so repeated queries are instant.

pub mod blame;
pub mod contributions;
pub mod glob;
pub mod report;

pub use contributions::{Contributions, CACHE_FILE, TOTALS};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Command-line options for a `git-credit` run.
#[derive(Debug, Default)]
pub struct Options {
    /// Recompute contributions even if the cache file exists.
    pub invalidate: bool,
    /// Pathspec excluded when computing contributions.
    pub exclude: Option<String>,
    /// Only show the top N contributors per table.
    pub top: Option<usize>,
    /// Glob patterns selecting which aggregated prefixes to report.
    pub pathspecs: Vec<String>,
}

/// Run `git-credit`: refresh the cache if needed, then render the query.
pub fn run(options: &Options) -> Result<()> {
    let repo = std::env::current_dir().context("failed to determine working directory")?;
    let cache_path = repo.join(CACHE_FILE);

    let contributions = if options.invalidate || !cache_path.exists() {
        let contributions = collect(&repo, options.exclude.as_deref())?;
        contributions
            .save(&cache_path)
            .with_context(|| format!("failed to write {}", cache_path.display()))?;
        contributions
    } else {
        Contributions::load(&cache_path)
            .with_context(|| format!("failed to read {}", cache_path.display()))?
    };

    let patterns = compile_pathspecs(&options.pathspecs)?;
    print!("{}", report::render(&contributions, &patterns, options.top));
    Ok(())
}

/// Blame every tracked file and aggregate authorship per path prefix.
pub fn collect(repo: &Path, exclude: Option<&str>) -> Result<Contributions> {
    let files = blame::list_tracked_files(repo, exclude)?;
    debug!(files = files.len(), "blaming tracked files");

    let bar = ProgressBar::new(files.len() as u64).with_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("static progress template")
            .progress_chars("█▓▒░  "),
    );

    let mut contributions = Contributions::default();
    for file in &files {
        for hunk in blame::blame_file(repo, file)? {
            contributions.credit(file, &hunk.author, hunk.lines);
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    Ok(contributions)
}

/// Compile query pathspecs; with none given, match only the root prefix.
fn compile_pathspecs(pathspecs: &[String]) -> Result<Vec<Regex>> {
    if pathspecs.is_empty() {
        return Ok(vec![Regex::new(r"\A\z").expect("static pattern")]);
    }
    pathspecs
        .iter()
        .map(|pathspec| {
            glob::compile_glob(pathspec)
                .with_context(|| format!("invalid pathspec {pathspec:?}"))
        })
        .collect()
}
