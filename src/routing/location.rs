//! Host locations as seen by the router.
//!
//! # Accepted Forms
//! - `/job/42`, `job/42`, `/job/42/` (all equivalent)
//! - `#/job/42` (hash routing)
//! - `/job/42?tab=log` (query kept separately, never matched)
//! - `http://host/#/job/42` or `http://host/job/42` (absolute URLs)
//!
//! # Design Decisions
//! - Empty segments are dropped, so leading/trailing/double slashes do not matter
//! - Segments are kept verbatim (no percent-decoding)
//! - Relative and absolute forms treat the fragment alike: it is the route
//!   when it starts with `/`, or when it is non-empty and the path is the
//!   root (`#job/42`, `/#job/42` and `http://host/#job/42` all give `/job/42`).
//!   Otherwise it is an in-page anchor and is dropped (`/sites#top`).

use std::fmt;

use url::{form_urlencoded, Url};

/// A parsed location. Replaced wholesale on navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Location {
    /// The root location (`/`).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse any of the accepted location forms. Never fails.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        let (path, fragment) = match Url::parse(raw) {
            Ok(url) if !url.cannot_be_a_base() => {
                let path = match url.query() {
                    Some(query) => format!("{}?{}", url.path(), query),
                    None => url.path().to_string(),
                };
                (path, url.fragment().map(str::to_string))
            }
            _ => match raw.split_once('#') {
                Some((path, fragment)) => (path.to_string(), Some(fragment.to_string())),
                None => (raw.to_string(), None),
            },
        };
        let target = match fragment {
            Some(fragment) if routes_on_fragment(&path, &fragment) => fragment,
            _ => path,
        };

        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target.as_str(), None),
        };

        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: query
                .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
                .unwrap_or_default(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Canonical path: leading `/`, no trailing `/`, no query.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First query value for `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn routes_on_fragment(path: &str, fragment: &str) -> bool {
    let path = path.split('?').next().unwrap_or_default();
    fragment.starts_with('/') || (!fragment.is_empty() && path.split('/').all(str::is_empty))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        if !self.query.is_empty() {
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            write!(f, "?{}", encoded)?;
        }
        Ok(())
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slashes_are_normalized() {
        let a = Location::parse("/job/42");
        let b = Location::parse("job/42/");
        let c = Location::parse("//job//42");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.segments(), ["job", "42"]);
        assert_eq!(a.path(), "/job/42");
    }

    #[test]
    fn test_root_forms() {
        assert!(Location::parse("/").is_root());
        assert!(Location::parse("").is_root());
        assert!(Location::parse("#/").is_root());
        assert_eq!(Location::root().to_string(), "/");
    }

    #[test]
    fn test_hash_routing() {
        let loc = Location::parse("#/sites/7");
        assert_eq!(loc.segments(), ["sites", "7"]);

        let loc = Location::parse("http://localhost:8888/#/job/42?tab=log");
        assert_eq!(loc.path(), "/job/42");
        assert_eq!(loc.query_param("tab"), Some("log"));
    }

    #[test]
    fn test_absolute_url_without_hash_route() {
        let loc = Location::parse("https://dash.example/sites?page=2#top");
        assert_eq!(loc.path(), "/sites");
        assert_eq!(loc.query_param("page"), Some("2"));
    }

    #[test]
    fn test_query_is_not_part_of_path() {
        let loc = Location::parse("/job/42?tab=log&tab=stats");
        assert_eq!(loc.segments(), ["job", "42"]);
        assert_eq!(loc.query_param("tab"), Some("log"));
        assert_eq!(loc.to_string(), "/job/42?tab=log&tab=stats");
    }

    #[test]
    fn test_relative_fragment_is_dropped() {
        assert_eq!(Location::parse("/sites/7#logs").path(), "/sites/7");
    }

    #[test]
    fn test_fragment_without_slash_routes_alike_in_both_forms() {
        for raw in ["#job/42", "/#job/42", "http://h/#job/42", "http://h#job/42"] {
            assert_eq!(Location::parse(raw).path(), "/job/42", "location {raw}");
        }
        for raw in ["/sites#top", "https://dash.example/sites#top"] {
            assert_eq!(Location::parse(raw).path(), "/sites", "location {raw}");
        }
        assert!(Location::parse("http://h/#").is_root());
    }
}
