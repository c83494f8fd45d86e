//! On-disk page cache: one JSON blob per request URL, plus the saved token.

use crate::cache::{cache_dir, url_cache_key};
use crate::stars::api::Page;
use crate::stars::APP_NAME;
use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Page cache rooted at a directory (normally `~/.cache/starlog/`).
pub struct PageCache {
    dir: PathBuf,
}

impl PageCache {
    /// Open the cache at the default per-user location.
    pub fn open_default() -> Self {
        Self::at(cache_dir(APP_NAME))
    }

    /// Open the cache at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn page_path(&self, url: &str) -> PathBuf {
        self.dir.join(url_cache_key(url))
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join("token")
    }

    /// Load the cached page for a URL, if present and well-formed.
    pub fn load(&self, url: &str) -> Option<Page> {
        let data = fs::read_to_string(self.page_path(url)).ok()?;
        let mut page: Page = serde_json::from_str(&data).ok()?;
        page.cached = true;
        Some(page)
    }

    /// Store a page in the cache.
    pub fn save(&self, page: &Page) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let data = serde_json::to_string(page)?;
        fs::write(self.page_path(&page.url), data)?;
        Ok(())
    }

    /// Read the persisted API token.
    pub fn load_token(&self) -> Option<String> {
        let token = fs::read_to_string(self.token_path()).ok()?;
        let token = token.trim().to_string();
        (!token.is_empty()).then_some(token)
    }

    /// Persist the API token for later runs.
    pub fn save_token(&self, token: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.token_path(), token)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stars::api::Stargazer;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn sample_page(url: &str) -> Page {
        Page {
            url: url.to_string(),
            link: HashMap::from([(
                "next".to_string(),
                format!("{url}?per_page=100&page=2"),
            )]),
            etag: "W/\"etag\"".to_string(),
            results: vec![Stargazer {
                starred_at: "2024-01-02T03:04:05Z".parse().unwrap(),
            }],
            cached: false,
        }
    }

    #[test]
    fn test_page_round_trip_marks_cached() -> Result<()> {
        let dir = tempdir()?;
        let cache = PageCache::at(dir.path());
        let page = sample_page("https://api.github.com/repos/a/b/stargazers");

        cache.save(&page)?;
        let loaded = cache.load(&page.url).expect("page should round-trip");

        assert!(loaded.cached);
        assert_eq!(loaded.etag, page.etag);
        assert_eq!(loaded.link, page.link);
        assert_eq!(loaded.results.len(), 1);
        Ok(())
    }

    #[test]
    fn test_load_miss_returns_none() {
        let dir = tempdir().unwrap();
        let cache = PageCache::at(dir.path());
        assert!(cache.load("https://example.com/never-saved").is_none());
    }

    #[test]
    fn test_token_round_trip() {
        let dir = tempdir().unwrap();
        let cache = PageCache::at(dir.path());
        assert!(cache.load_token().is_none());
        cache.save_token("ghp_example").unwrap();
        assert_eq!(cache.load_token().as_deref(), Some("ghp_example"));
    }
}
