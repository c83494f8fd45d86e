//! Terminal table and bar chart for star history.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use std::fmt::Write as _;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const BAR_WIDTH: usize = 40;

/// Date format: sub-day intervals keep the time of day.
fn date_format(interval: Duration) -> &'static str {
    if interval < Duration::days(1) {
        "%Y-%m-%d %H:%M:%S"
    } else {
        "%Y-%m-%d"
    }
}

/// Render the Date / Stars table.
pub fn render_table(
    counts: &BTreeMap<DateTime<Utc>, u64>,
    repository: &str,
    interval: Duration,
) -> String {
    let format = date_format(interval);
    let date_width = counts
        .keys()
        .map(|date| date.format(format).to_string().len())
        .max()
        .unwrap_or(0)
        .max("Date".len());
    let stars_width = counts
        .values()
        .map(|count| count.to_string().len())
        .max()
        .unwrap_or(0)
        .max("Stars".len());

    let mut out = String::new();
    let _ = writeln!(out, "\n{BOLD}{repository}{RESET}");
    let _ = writeln!(
        out,
        "{DIM}{}{RESET}",
        "─".repeat(date_width + stars_width + 2)
    );
    let _ = writeln!(
        out,
        "{DIM}{:<date_width$}  {:>stars_width$}{RESET}",
        "Date", "Stars"
    );

    for (date, count) in counts {
        let _ = writeln!(
            out,
            "{:<date_width$}  {:>stars_width$}",
            date.format(format).to_string(),
            count
        );
    }

    out
}

/// Render a horizontal bar chart, one row per bucket.
pub fn render_chart(
    counts: &BTreeMap<DateTime<Utc>, u64>,
    repository: &str,
    interval: Duration,
) -> String {
    let format = date_format(interval);
    let max = counts.values().copied().max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "\n{BOLD}{repository}{RESET}");
    if max == 0 {
        return out;
    }

    let date_width = counts
        .keys()
        .map(|date| date.format(format).to_string().len())
        .max()
        .unwrap_or(0);

    for (date, count) in counts {
        let width = ((count * BAR_WIDTH as u64) as f64 / max as f64).round() as usize;
        // At least one cell for any non-empty bucket.
        let width = width.max(1);
        let _ = writeln!(
            out,
            "{DIM}{:<date_width$}{RESET}  {} {count}",
            date.format(format).to_string(),
            "█".repeat(width)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts() -> BTreeMap<DateTime<Utc>, u64> {
        BTreeMap::from([
            ("2024-06-01T00:00:00Z".parse().unwrap(), 3),
            ("2024-06-02T00:00:00Z".parse().unwrap(), 12),
        ])
    }

    #[test]
    fn test_table_has_dates_and_counts() {
        let out = render_table(&counts(), "octocat/spoon-knife", Duration::days(1));
        assert!(out.contains("octocat/spoon-knife"));
        assert!(out.contains("2024-06-01"));
        assert!(out.contains("12"));
        // Day intervals drop the time of day.
        assert!(!out.contains("00:00:00"));
    }

    #[test]
    fn test_table_subday_interval_keeps_time() {
        let out = render_table(&counts(), "octocat/spoon-knife", Duration::hours(1));
        assert!(out.contains("2024-06-01 00:00:00"));
    }

    #[test]
    fn test_chart_scales_to_max() {
        let out = render_chart(&counts(), "octocat/spoon-knife", Duration::days(1));
        let longest = out
            .lines()
            .map(|line| line.matches('█').count())
            .max()
            .unwrap();
        assert_eq!(longest, BAR_WIDTH);
        // The smaller bucket still gets a visible bar.
        assert!(out.lines().any(|line| {
            let cells = line.matches('█').count();
            cells > 0 && cells < BAR_WIDTH
        }));
    }

    #[test]
    fn test_chart_empty_counts() {
        let out = render_chart(&BTreeMap::new(), "octocat/spoon-knife", Duration::days(1));
        assert!(!out.contains('█'));
    }
}
