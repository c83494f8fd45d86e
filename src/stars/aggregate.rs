//! Interval parsing and star-date bucketing.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

/// Parse an interval spec (`Y`/`year`, `m`/`month`, `w`/`week`, `d`/`day`,
/// `H`/`hour`, `M`/`minute`, `S`/`second`). Anything else, or no spec at
/// all, means one day.
pub fn parse_interval(spec: Option<&str>) -> Duration {
    match spec {
        Some("Y") | Some("year") => Duration::days(365),
        Some("m") | Some("month") => Duration::days(31),
        Some("w") | Some("week") => Duration::weeks(1),
        Some("H") | Some("hour") => Duration::hours(1),
        Some("M") | Some("minute") => Duration::minutes(1),
        Some("S") | Some("second") => Duration::seconds(1),
        _ => Duration::days(1),
    }
}

/// Truncate an instant onto the interval grid anchored at `now`.
///
/// The bucket is `now - interval * floor((now - instant) / interval)`, the
/// oldest grid point at or after the instant.
pub fn truncate(
    now: DateTime<Utc>,
    instant: DateTime<Utc>,
    interval: Duration,
) -> DateTime<Utc> {
    let bucket_secs = interval.num_seconds().max(1);
    let steps = (now - instant).num_seconds().div_euclid(bucket_secs);
    now - Duration::seconds(steps * bucket_secs)
}

/// Count stars per interval bucket, in chronological order.
pub fn aggregate(
    dates: &[DateTime<Utc>],
    interval: Duration,
    now: DateTime<Utc>,
) -> BTreeMap<DateTime<Utc>, u64> {
    let mut counts = BTreeMap::new();
    for date in dates {
        *counts.entry(truncate(now, *date, interval)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_interval_specs() {
        assert_eq!(parse_interval(Some("year")), Duration::days(365));
        assert_eq!(parse_interval(Some("m")), Duration::days(31));
        assert_eq!(parse_interval(Some("w")), Duration::weeks(1));
        assert_eq!(parse_interval(Some("H")), Duration::hours(1));
        assert_eq!(parse_interval(Some("S")), Duration::seconds(1));
    }

    #[test]
    fn test_parse_interval_defaults_to_a_day() {
        assert_eq!(parse_interval(None), Duration::days(1));
        assert_eq!(parse_interval(Some("fortnight")), Duration::days(1));
    }

    #[test]
    fn test_truncate_lands_on_the_grid() {
        let now = at("2024-06-10T12:00:00Z");
        let instant = at("2024-06-08T09:30:00Z");
        let bucket = truncate(now, instant, Duration::days(1));
        // Just over two days back floors to the grid point two days before now.
        assert_eq!(bucket, at("2024-06-08T12:00:00Z"));
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let now = at("2024-06-10T12:00:00Z");
        let instant = at("2024-05-01T00:00:00Z");
        let interval = Duration::weeks(1);
        let once = truncate(now, instant, interval);
        assert_eq!(truncate(now, once, interval), once);
    }

    #[test]
    fn test_truncate_now_is_now() {
        let now = at("2024-06-10T12:00:00Z");
        assert_eq!(truncate(now, now, Duration::days(1)), now);
    }

    #[test]
    fn test_aggregate_counts_chronologically() {
        let now = at("2024-06-10T00:00:00Z");
        let dates = vec![
            at("2024-06-09T05:00:00Z"),
            at("2024-06-09T07:00:00Z"),
            at("2024-06-01T12:00:00Z"),
        ];
        let counts = aggregate(&dates, Duration::days(1), now);

        let buckets: Vec<_> = counts.keys().collect();
        assert!(buckets.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(counts.values().sum::<u64>(), 3);
        // Both 06-09 stars fall in the bucket ending at `now`.
        assert_eq!(counts[&at("2024-06-10T00:00:00Z")], 2);
        assert_eq!(counts[&at("2024-06-02T00:00:00Z")], 1);
    }

    #[test]
    fn test_aggregate_empty() {
        let now = at("2024-06-10T00:00:00Z");
        assert!(aggregate(&[], Duration::days(1), now).is_empty());
    }
}
