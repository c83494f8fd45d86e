//! GitHub star history for `starlog`.
//!
//! Fetches the stargazer timeline page by page, caching each page on disk
//! and revalidating with ETags, then buckets the star timestamps onto an
//! interval grid for reporting.

pub mod aggregate;
pub mod api;
pub mod cache;
pub mod report;

pub use api::{FetchOutcome, Page, StarError, StargazerApi, StargazerClient};
pub use cache::PageCache;

use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Cache directory name, also used for the persisted token.
pub const APP_NAME: &str = "starlog";

/// Resolve the API token: flag or environment first, then the cached copy.
///
/// A freshly supplied token is persisted for later runs; failure to persist
/// is not fatal.
pub fn resolve_token(supplied: Option<String>, cache: &PageCache) -> Result<String, StarError> {
    if let Some(token) = supplied.filter(|token| !token.is_empty()) {
        if let Err(error) = cache.save_token(&token) {
            debug!(%error, "failed to persist token");
        }
        return Ok(token);
    }
    cache.load_token().ok_or(StarError::MissingToken)
}

/// Retrieve every star timestamp for a repository, following pagination.
///
/// Sleeps one second between live requests; pages served from the cache
/// (offline mode or a 304 revalidation) do not count against the limit.
pub fn fetch_star_dates(
    client: &impl StargazerApi,
    cache: &PageCache,
    repository: &str,
    offline: bool,
) -> Result<Vec<DateTime<Utc>>, StarError> {
    let url = format!("https://api.github.com/repos/{repository}/stargazers");

    let bar = ProgressBar::new_spinner().with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("static progress template"),
    );
    bar.set_message("downloading stargazers");

    let mut page = get_page(client, cache, &url, offline)?;
    let mut dates: Vec<DateTime<Utc>> = page.starred_at().collect();

    while let Some(next) = page.link.get("next").cloned() {
        if let Some(last) = page.link.get("last") {
            let total = api::page_parameter(last);
            let current = api::page_parameter(&next);
            if total > 0 {
                bar.set_style(
                    ProgressStyle::default_bar()
                        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                        .expect("static progress template")
                        .progress_chars("█▓▒░  "),
                );
                bar.set_length(total);
                bar.set_position(current);
            }
        }

        if !page.cached {
            thread::sleep(Duration::from_secs(1));
        }

        page = get_page(client, cache, &next, offline)?;
        dates.extend(page.starred_at());
    }

    bar.finish_and_clear();
    Ok(dates)
}

/// Fetch one page, preferring the disk cache.
///
/// Offline mode returns a cached page without any request. Otherwise the
/// cached ETag is sent for revalidation and a 304 reuses the cached page.
fn get_page(
    client: &impl StargazerApi,
    cache: &PageCache,
    url: &str,
    offline: bool,
) -> Result<Page, StarError> {
    let mut cached = cache.load(url);

    if offline {
        if let Some(page) = cached.take() {
            debug!(url, "serving page from cache");
            return Ok(page);
        }
    }

    let etag = cached.as_ref().map(|page| page.etag.as_str());
    match client.fetch(url, etag)? {
        FetchOutcome::NotModified => {
            debug!(url, "not modified, reusing cached page");
            cached.ok_or_else(|| {
                StarError::Malformed(format!("304 for {url} but no cached page exists"))
            })
        }
        FetchOutcome::Fresh(page) => {
            if let Err(error) = cache.save(&page) {
                debug!(%error, url, "failed to cache page");
            }
            Ok(page)
        }
    }
}
