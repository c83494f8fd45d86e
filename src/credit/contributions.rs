//! Hierarchical contribution aggregation and its on-disk cache.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Reserved author key holding the per-prefix line total.
pub const TOTALS: &str = "*";

/// Cache file written next to the repository root.
pub const CACHE_FILE: &str = ".git-credit.json";

/// Surviving line counts per author, keyed by aggregated path prefix.
///
/// The empty prefix `""` is the repository total; `a/b/c.rs` also credits
/// `a` and `a/b`. Each prefix carries a [`TOTALS`] entry alongside authors.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Contributions {
    pub paths: BTreeMap<String, BTreeMap<String, u64>>,
}

impl Contributions {
    /// Credit `lines` by `author` to a file and all its ancestor prefixes.
    pub fn credit(&mut self, file: &str, author: &str, lines: u64) {
        for prefix in prefixes(file) {
            let blame = self.paths.entry(prefix).or_default();
            *blame.entry(author.to_string()).or_insert(0) += lines;
            *blame.entry(TOTALS.to_string()).or_insert(0) += lines;
        }
    }

    /// Load the cache from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Save the cache to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string(self)?;
        fs::write(path, data)?;
        Ok(())
    }
}

/// All ancestor prefixes of a path, from the root `""` to the path itself.
fn prefixes(path: &str) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut prefix = String::new();
    for part in path.split('/') {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(part);
        out.push(prefix.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_prefixes() {
        assert_eq!(
            prefixes("a/b/c.rs"),
            vec!["", "a", "a/b", "a/b/c.rs"]
        );
        assert_eq!(prefixes("top.rs"), vec!["", "top.rs"]);
    }

    #[test]
    fn test_credit_aggregates_into_ancestors() {
        let mut contributions = Contributions::default();
        contributions.credit("src/lib.rs", "Alice", 10);
        contributions.credit("src/main.rs", "Bob", 4);

        assert_eq!(contributions.paths[""]["Alice"], 10);
        assert_eq!(contributions.paths[""][TOTALS], 14);
        assert_eq!(contributions.paths["src"]["Bob"], 4);
        assert_eq!(contributions.paths["src"][TOTALS], 14);
        assert_eq!(contributions.paths["src/lib.rs"][TOTALS], 10);
        assert!(!contributions.paths["src/lib.rs"].contains_key("Bob"));
    }

    #[test]
    fn test_cache_round_trip() -> Result<()> {
        let mut contributions = Contributions::default();
        contributions.credit("src/lib.rs", "Alice", 10);
        contributions.credit("docs/guide.md", "Bob", 7);

        let dir = tempdir()?;
        let path = dir.path().join(CACHE_FILE);
        contributions.save(&path)?;
        let loaded = Contributions::load(&path)?;

        assert_eq!(contributions, loaded);
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        assert!(Contributions::load(Path::new("/nonexistent/.git-credit.json")).is_err());
    }
}
