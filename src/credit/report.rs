//! Terminal tables for contribution queries.

use crate::credit::{Contributions, TOTALS};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt::Write as _;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const PERCENT_WIDTH: usize = "100.00%".len();

/// Render one table per matching path prefix, for each query pattern.
pub fn render(contributions: &Contributions, patterns: &[Regex], top: Option<usize>) -> String {
    let mut out = String::new();

    for pattern in patterns {
        let paths: Vec<&String> = contributions
            .paths
            .keys()
            .filter(|path| pattern.is_match(path.as_str()))
            .collect();

        // Size columns to content across every table for this pattern.
        let author_width = paths
            .iter()
            .flat_map(|path| contributions.paths[*path].keys())
            .map(|author| display_name(author).chars().count())
            .max()
            .unwrap_or(0)
            .max("Author".len());
        let lines_width = paths
            .iter()
            .flat_map(|path| contributions.paths[*path].values())
            .map(|lines| lines.to_string().len())
            .max()
            .unwrap_or(0)
            .max("Lines".len());

        for path in paths {
            render_table(
                &mut out,
                path,
                &contributions.paths[path.as_str()],
                top,
                author_width,
                lines_width,
            );
        }
    }

    out
}

/// Render the Author / Lines / %Lines table for one path prefix.
fn render_table(
    out: &mut String,
    path: &str,
    blame: &BTreeMap<String, u64>,
    top: Option<usize>,
    author_width: usize,
    lines_width: usize,
) {
    let total = blame.get(TOTALS).copied().unwrap_or(0);
    if total == 0 {
        return;
    }

    let title = if path.is_empty() { "Total" } else { path };
    let rule_width = author_width + lines_width + PERCENT_WIDTH + 4;
    let _ = writeln!(out, "\n{BOLD}{title}{RESET}");
    let _ = writeln!(out, "{DIM}{}{RESET}", "─".repeat(rule_width));
    let _ = writeln!(
        out,
        "{DIM}{:<author_width$}  {:>lines_width$}  {:>PERCENT_WIDTH$}{RESET}",
        "Author", "Lines", "%Lines"
    );

    let mut authors: Vec<&String> = blame.keys().filter(|author| *author != TOTALS).collect();
    authors.sort_by_key(|author| std::cmp::Reverse(blame[*author]));
    if let Some(top) = top {
        authors.truncate(top);
    }

    for author in std::iter::once(TOTALS.to_string()).chain(authors.into_iter().cloned()) {
        let lines = blame[&author];
        let percent = 100.0 * lines as f64 / total as f64;
        let _ = writeln!(
            out,
            "{:<author_width$}  {:>lines_width$}  {:>PERCENT_WIDTH$}",
            display_name(&author),
            lines,
            format!("{percent:.2}%")
        );
    }
}

/// Display the reserved totals key as "Total".
fn display_name(author: &str) -> &str {
    if author == TOTALS {
        "Total"
    } else {
        author
    }
}
