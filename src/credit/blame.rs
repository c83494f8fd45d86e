//! Git subprocess integration and incremental blame parsing.
//!
//! Both commands are invoked as plain subprocesses and their line-oriented
//! stdout is parsed; a non-zero exit status is propagated with stderr
//! attached.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Lines credited to one author by a single blame hunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HunkCredit {
    pub author: String,
    pub lines: u64,
}

/// List tracked files via `git ls-files`, optionally excluding a pathspec.
pub fn list_tracked_files(repo: &Path, exclude: Option<&str>) -> Result<Vec<String>> {
    let mut cmd = Command::new("git");
    cmd.arg("ls-files").current_dir(repo);
    if let Some(pathspec) = exclude {
        cmd.arg("--").arg(format!(":(exclude){pathspec}"));
    }

    let output = cmd.output().context("failed to run `git ls-files`")?;
    if !output.status.success() {
        bail!(
            "`git ls-files` exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout =
        String::from_utf8(output.stdout).context("`git ls-files` produced non-UTF-8 output")?;
    Ok(stdout.lines().map(str::to_owned).collect())
}

/// Blame a single file via `git blame --incremental` and credit its lines.
pub fn blame_file(repo: &Path, file: &str) -> Result<Vec<HunkCredit>> {
    debug!(file, "running incremental blame");
    let output = Command::new("git")
        .args(["blame", "--incremental", "--"])
        .arg(file)
        .current_dir(repo)
        .output()
        .with_context(|| format!("failed to run `git blame --incremental -- {file}`"))?;

    if !output.status.success() {
        bail!(
            "`git blame` exited with {} for {file}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let stdout = String::from_utf8(output.stdout)
        .with_context(|| format!("`git blame` produced non-UTF-8 output for {file}"))?;
    Ok(parse_incremental(&stdout))
}

/// Parse `git blame --incremental` output into per-hunk author credits.
///
/// A hunk opens with `<40-hex sha> <orig> <final> <count>`. Header lines
/// follow only the first hunk of each commit, so authors are remembered per
/// commit id; `filename` terminates the hunk and credits its lines.
pub fn parse_incremental(text: &str) -> Vec<HunkCredit> {
    let mut authors: HashMap<&str, &str> = HashMap::new();
    let mut sha = "";
    let mut hunk_lines: u64 = 0;
    let mut credits = Vec::new();

    for line in text.lines() {
        let (tag, payload) = line.split_once(' ').unwrap_or((line, ""));
        if tag.len() == 40 && tag.bytes().all(|b| b.is_ascii_hexdigit()) {
            sha = tag;
            hunk_lines = payload
                .split_whitespace()
                .nth(2)
                .and_then(|count| count.parse().ok())
                .unwrap_or(1);
        } else if !sha.is_empty() {
            match tag {
                "author" => {
                    authors.insert(sha, payload);
                }
                "filename" => {
                    let author = authors.get(sha).copied().unwrap_or("Unknown");
                    credits.push(HunkCredit {
                        author: author.to_string(),
                        lines: hunk_lines,
                    });
                }
                _ => {}
            }
        }
    }

    credits
}
