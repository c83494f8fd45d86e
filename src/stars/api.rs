//! GitHub stargazers API client — sync HTTP via ureq, no async runtime.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StarError {
    #[error("no API token: pass --token or set GITHUB_TOKEN")]
    MissingToken,
    #[error("GitHub API returned {status} for {url}: {body}")]
    Api { status: u16, url: String, body: String },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One stargazer record; only the timestamp is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stargazer {
    pub starred_at: DateTime<Utc>,
}

/// A page of stargazer results, as cached on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    /// Link-header relations (`next`, `last`, ...) to URLs.
    pub link: HashMap<String, String>,
    pub etag: String,
    pub results: Vec<Stargazer>,
    /// Whether this page came from the disk cache rather than the network.
    #[serde(skip)]
    pub cached: bool,
}

impl Page {
    /// The star timestamps on this page.
    pub fn starred_at(&self) -> impl Iterator<Item = DateTime<Utc>> + '_ {
        self.results.iter().map(|stargazer| stargazer.starred_at)
    }
}

/// Outcome of a conditional fetch.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server returned 304; the cached page is still current.
    NotModified,
    Fresh(Page),
}

/// Source of stargazer pages. The pagination loop is written against this
/// so it can be driven without a network.
pub trait StargazerApi {
    /// GET one stargazers page; `etag` enables conditional revalidation.
    fn fetch(&self, url: &str, etag: Option<&str>) -> Result<FetchOutcome, StarError>;
}

/// Sync client for the stargazers endpoint.
pub struct StargazerClient {
    agent: ureq::Agent,
    token: String,
}

fn make_agent() -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // We handle status codes ourselves
        .timeout_global(Some(std::time::Duration::from_secs(30)))
        .build()
        .new_agent()
}

impl StargazerClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            agent: make_agent(),
            token: token.into(),
        }
    }
}

impl StargazerApi for StargazerClient {
    fn fetch(&self, url: &str, etag: Option<&str>) -> Result<FetchOutcome, StarError> {
        let mut request = self
            .agent
            .get(url)
            .header("Accept", "application/vnd.github.v3.star+json")
            .header("Authorization", &format!("token {}", self.token));

        // Pagination links already carry per_page; only the first URL needs it.
        if !url.contains("per_page=") {
            request = request.query("per_page", "100");
        }
        if let Some(etag) = etag {
            request = request.header("If-None-Match", etag);
        }

        let response = request.call().map_err(|source| StarError::Transport {
            url: url.to_string(),
            source: Box::new(source),
        })?;

        let status = response.status().as_u16();
        if status == 304 {
            return Ok(FetchOutcome::NotModified);
        }
        if status >= 400 {
            let body = response.into_body().read_to_string().unwrap_or_default();
            return Err(StarError::Api {
                status,
                url: url.to_string(),
                body,
            });
        }

        let etag = header_string(&response, "etag").unwrap_or_default();
        let link = header_string(&response, "link")
            .map(|header| parse_link_header(&header))
            .unwrap_or_default();

        let results: Vec<Stargazer> = response
            .into_body()
            .read_json()
            .map_err(|error| StarError::Malformed(error.to_string()))?;

        Ok(FetchOutcome::Fresh(Page {
            url: url.to_string(),
            link,
            etag,
            results,
            cached: false,
        }))
    }
}

fn header_string(response: &ureq::http::Response<ureq::Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Parse a Link header into a relation → URL map.
///
/// Fields look like `<https://...&page=2>; rel="next"`.
pub fn parse_link_header(header: &str) -> HashMap<String, String> {
    let mut relations = HashMap::new();
    for field in header.split(',') {
        let Some((url, rel)) = field.split_once(';') else {
            continue;
        };
        let url = url
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .to_string();
        let rel = rel
            .trim()
            .strip_prefix("rel=\"")
            .and_then(|rel| rel.strip_suffix('"'));
        if let Some(rel) = rel {
            relations.insert(rel.to_string(), url);
        }
    }
    relations
}

/// Extract the `page` query parameter from a pagination URL (0 if absent).
pub fn page_parameter(url: &str) -> u64 {
    let Some((_, query)) = url.split_once('?') else {
        return 0;
    };
    for field in query.split('&') {
        if let Some((key, value)) = field.split_once('=') {
            if key == "page" {
                return value.parse().unwrap_or(0);
            }
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "<https://api.github.com/repositories/1/stargazers?per_page=100&page=2>; rel=\"next\", <https://api.github.com/repositories/1/stargazers?per_page=100&page=17>; rel=\"last\"";

    #[test]
    fn test_parse_link_header_relations() {
        let link = parse_link_header(LINK);
        assert_eq!(link.len(), 2);
        assert!(link["next"].ends_with("page=2"));
        assert!(link["last"].ends_with("page=17"));
    }

    #[test]
    fn test_parse_link_header_empty() {
        assert!(parse_link_header("").is_empty());
    }

    #[test]
    fn test_parse_link_header_ignores_malformed_fields() {
        let link = parse_link_header("<https://example.com>; rel=\"next\", garbage");
        assert_eq!(link.len(), 1);
        assert_eq!(link["next"], "https://example.com");
    }

    #[test]
    fn test_page_parameter() {
        assert_eq!(
            page_parameter("https://api.github.com/x?per_page=100&page=17"),
            17
        );
        assert_eq!(page_parameter("https://api.github.com/x?page=3"), 3);
        assert_eq!(page_parameter("https://api.github.com/x"), 0);
        assert_eq!(page_parameter("https://api.github.com/x?per_page=100"), 0);
    }

    #[test]
    fn test_page_round_trips_through_json() {
        let page = Page {
            url: "https://example.com".to_string(),
            link: HashMap::from([("next".to_string(), "https://example.com?page=2".to_string())]),
            etag: "W/\"abc\"".to_string(),
            results: vec![Stargazer {
                starred_at: "2023-04-01T12:00:00Z".parse().unwrap(),
            }],
            cached: false,
        };
        let json = serde_json::to_string(&page).unwrap();
        let loaded: Page = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.url, page.url);
        assert_eq!(loaded.link, page.link);
        assert_eq!(loaded.etag, page.etag);
        assert_eq!(loaded.results.len(), 1);
        assert!(!loaded.cached);
    }
}
