//! Cache path utilities - per-tool directories under ~/.cache/<app>/

use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Get the cache directory for a tool.
/// Uses ~/.cache/<app>/ on Unix, %LOCALAPPDATA%/<app>/ on Windows.
pub fn cache_dir(app: &str) -> PathBuf {
    let base = if cfg!(windows) {
        std::env::var("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::cache_dir().unwrap_or_else(|| PathBuf::from(".")))
    } else {
        dirs::cache_dir().unwrap_or_else(|| {
            // Fallback to ~/.cache
            dirs::home_dir()
                .map(|h| h.join(".cache"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    };

    base.join(app)
}

/// Ensure the cache directory for a tool exists.
pub fn ensure_cache_dir(app: &str) -> std::io::Result<PathBuf> {
    let dir = cache_dir(app);
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Hash a URL to a stable cache-file name.
pub fn url_cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_cache_key_deterministic() {
        let a = url_cache_key("https://api.github.com/repos/a/b/stargazers");
        let b = url_cache_key("https://api.github.com/repos/a/b/stargazers");
        assert_eq!(a, b);
    }

    #[test]
    fn test_url_cache_key_distinguishes_urls() {
        let a = url_cache_key("https://example.com/?page=1");
        let b = url_cache_key("https://example.com/?page=2");
        assert_ne!(a, b);
    }

    #[test]
    fn test_cache_dir_ends_with_app_name() {
        let dir = cache_dir("starlog");
        assert!(dir.to_string_lossy().ends_with("starlog"));
    }
}
