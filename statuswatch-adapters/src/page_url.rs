//! Deriving API endpoints from a status page address.
//!
//! Users usually paste the address they see in the browser
//! (`https://status.example.com/status/main`), while the API lives under
//! `/api/status-page/<slug>` on the same base. [`StatusPageUrl`] accepts
//! either form, or a bare base URL plus an explicit slug.

use std::fmt;

use url::Url;

use crate::AdapterError;

/// Path segment that precedes the slug in a browser-facing status page URL.
const STATUS_SEGMENT: &str = "status";

/// A status page location split into base URL and slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPageUrl {
    base: Url,
    slug: String,
}

impl StatusPageUrl {
    /// Parse a status page address.
    ///
    /// `slug` overrides whatever slug the address carries. Addresses
    /// without a scheme are assumed to be `https://`.
    ///
    /// ```rust
    /// use statuswatch_adapters::StatusPageUrl;
    ///
    /// let page = StatusPageUrl::parse("status.example.com/status/main", None).unwrap();
    /// assert_eq!(page.slug(), "main");
    /// assert_eq!(page.base().as_str(), "https://status.example.com/");
    /// ```
    pub fn parse(input: &str, slug: Option<&str>) -> Result<Self, AdapterError> {
        let input = input.trim();
        // `host:port/...` would otherwise parse with the host as the scheme
        let mut url = if input.contains("://") {
            Url::parse(input)?
        } else {
            Url::parse(&format!("https://{}", input))?
        };

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(AdapterError::InvalidUrl(format!(
                "unsupported scheme '{}' in {}",
                url.scheme(),
                input
            )));
        }

        url.set_query(None);
        url.set_fragment(None);

        let segments: Vec<String> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).map(str::to_string).collect())
            .unwrap_or_default();

        let (prefix, found_slug) = split_slug(&segments);

        let slug = match (slug.map(str::trim).filter(|s| !s.is_empty()), found_slug) {
            (Some(explicit), _) => explicit.to_string(),
            (None, Some(found)) => found,
            (None, None) => {
                return Err(AdapterError::InvalidUrl(format!(
                    "no status page slug in '{}' and none given",
                    input
                )))
            }
        };

        let mut path = prefix.join("/");
        path.insert(0, '/');
        if path.len() > 1 {
            path.push('/');
        }
        url.set_path(&path);

        Ok(Self { base: url, slug })
    }

    /// Base URL the API paths are appended to; always ends in `/`.
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Endpoint returning the page configuration and monitor list.
    pub fn page_endpoint(&self) -> Result<Url, AdapterError> {
        self.endpoint(&["api", "status-page", &self.slug])
    }

    /// Endpoint returning heartbeats and uptime ratios.
    pub fn heartbeat_endpoint(&self) -> Result<Url, AdapterError> {
        self.endpoint(&["api", "status-page", "heartbeat", &self.slug])
    }

    /// The browser-facing address of the page.
    pub fn page_url(&self) -> Result<Url, AdapterError> {
        self.endpoint(&[STATUS_SEGMENT, &self.slug])
    }

    fn endpoint(&self, parts: &[&str]) -> Result<Url, AdapterError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| AdapterError::InvalidUrl(format!("{} cannot be a base", self.base)))?
            .pop_if_empty()
            .extend(parts);
        Ok(url)
    }
}

impl fmt::Display for StatusPageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}status/{}", self.base, self.slug)
    }
}

/// Split path segments into the base prefix and an embedded slug.
///
/// Recognizes `.../status/<slug>` and `.../api/status-page/<slug>`.
fn split_slug(segments: &[String]) -> (&[String], Option<String>) {
    for (i, pair) in segments.windows(2).enumerate() {
        if pair[0] == STATUS_SEGMENT {
            return (&segments[..i], Some(pair[1].clone()));
        }
        if pair[0] == "status-page" && i > 0 && segments[i - 1] == "api" {
            let slug = segments.get(i + 1).filter(|s| s.as_str() != "heartbeat").cloned();
            let slug = slug.or_else(|| segments.get(i + 2).cloned());
            return (&segments[..i - 1], slug);
        }
    }
    (segments, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_status_page_url() {
        let page = StatusPageUrl::parse("https://status.example.com/status/main", None).unwrap();
        assert_eq!(page.base().as_str(), "https://status.example.com/");
        assert_eq!(page.slug(), "main");
        assert_eq!(
            page.page_endpoint().unwrap().as_str(),
            "https://status.example.com/api/status-page/main"
        );
        assert_eq!(
            page.heartbeat_endpoint().unwrap().as_str(),
            "https://status.example.com/api/status-page/heartbeat/main"
        );
    }

    #[test]
    fn test_trailing_slash_and_query_are_ignored() {
        let page =
            StatusPageUrl::parse("http://localhost:3001/status/prod/?theme=dark#top", None).unwrap();
        assert_eq!(page.base().as_str(), "http://localhost:3001/");
        assert_eq!(page.slug(), "prod");
    }

    #[test]
    fn test_missing_scheme_defaults_to_https() {
        let page = StatusPageUrl::parse("status.example.com", Some("main")).unwrap();
        assert_eq!(page.base().scheme(), "https");
        assert_eq!(page.to_string(), "https://status.example.com/status/main");
    }

    #[test]
    fn test_host_and_port_without_scheme() {
        let page = StatusPageUrl::parse("localhost:3001/status/main", None).unwrap();
        assert_eq!(page.base().as_str(), "https://localhost:3001/");
        assert_eq!(page.slug(), "main");

        let page = StatusPageUrl::parse("status.example.com:8443/status/main", None).unwrap();
        assert_eq!(page.base().as_str(), "https://status.example.com:8443/");
        assert_eq!(
            page.page_endpoint().unwrap().as_str(),
            "https://status.example.com:8443/api/status-page/main"
        );

        let page = StatusPageUrl::parse("localhost:3001", Some("ops")).unwrap();
        assert_eq!(page.base().as_str(), "https://localhost:3001/");
        assert_eq!(page.slug(), "ops");
        assert_eq!(page.to_string(), "https://localhost:3001/status/ops");
    }

    #[test]
    fn test_sub_path_deployment() {
        let page = StatusPageUrl::parse("https://example.com/kuma/status/ops", None).unwrap();
        assert_eq!(page.base().as_str(), "https://example.com/kuma/");
        assert_eq!(
            page.page_endpoint().unwrap().as_str(),
            "https://example.com/kuma/api/status-page/ops"
        );
    }

    #[test]
    fn test_api_url_is_accepted() {
        let page =
            StatusPageUrl::parse("https://example.com/api/status-page/heartbeat/main", None).unwrap();
        assert_eq!(page.base().as_str(), "https://example.com/");
        assert_eq!(page.slug(), "main");

        let page = StatusPageUrl::parse("https://example.com/api/status-page/main", None).unwrap();
        assert_eq!(page.slug(), "main");
    }

    #[test]
    fn test_explicit_slug_wins() {
        let page = StatusPageUrl::parse("https://example.com/status/main", Some("other")).unwrap();
        assert_eq!(page.slug(), "other");
        assert_eq!(page.base().as_str(), "https://example.com/");
    }

    #[test]
    fn test_base_url_without_slug_is_rejected() {
        let err = StatusPageUrl::parse("https://example.com/", None).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidUrl(_)));

        let err = StatusPageUrl::parse("https://example.com/", Some("  ")).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidUrl(_)));
    }

    #[test]
    fn test_unsupported_scheme_is_rejected() {
        let err = StatusPageUrl::parse("ftp://example.com/status/main", None).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidUrl(_)));
    }
}
