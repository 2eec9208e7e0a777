//! Path templates with literal and named segments.
//!
//! # Syntax
//! - Segments are separated by `/`; empty segments are ignored
//! - `:name` is a named segment matching any non-empty segment
//! - Anything else is a literal, compared exactly (case-sensitive)
//! - `/` (or the empty string) is the root pattern with zero segments

use std::collections::HashSet;
use std::fmt;

use crate::routing::error::{PatternError, ReverseError};
use crate::routing::params::Params;

/// One segment of a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    raw: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, PatternError> {
        let mut seen = HashSet::new();
        let mut segments = Vec::new();

        for (position, part) in raw.split('/').filter(|s| !s.is_empty()).enumerate() {
            match part.strip_prefix(':') {
                Some("") => return Err(PatternError::EmptyParamName(position)),
                Some(name) => {
                    if !seen.insert(name) {
                        return Err(PatternError::DuplicateParam(name.to_string()));
                    }
                    segments.push(Segment::Param(name.to_string()));
                }
                None => segments.push(Segment::Literal(part.to_string())),
            }
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when both patterns accept exactly the same locations.
    ///
    /// Parameter names are irrelevant: `job/:id` and `job/:job_id` overlap fully.
    pub fn same_shape(&self, other: &Pattern) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }

    /// Match location segments, binding named segments on success.
    pub fn match_segments(&self, path: &[String]) -> Option<Params> {
        if path.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, value) in self.segments.iter().zip(path) {
            match segment {
                Segment::Literal(literal) if literal == value => {}
                Segment::Literal(_) => return None,
                Segment::Param(_) if value.is_empty() => return None,
                Segment::Param(name) => params.insert(name.as_str(), value.as_str()),
            }
        }
        Some(params)
    }

    /// Build a concrete path from this pattern. `route` names the route in errors.
    ///
    /// Values are inserted verbatim, so a value holding `/`, `?` or `#` is
    /// rejected: the resulting path would not resolve back to the same bindings.
    pub fn expand(&self, route: &str, params: &Params) -> Result<String, ReverseError> {
        let mut path = String::new();
        for segment in &self.segments {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => {
                    let value = params.get(name).ok_or_else(|| ReverseError::MissingParam {
                        route: route.to_string(),
                        param: name.clone(),
                    })?;
                    if value.is_empty() || value.contains(['/', '?', '#']) {
                        return Err(ReverseError::InvalidParam {
                            param: name.clone(),
                            value: value.to_string(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }
        if path.is_empty() {
            path.push('/');
        }
        Ok(path)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segs(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_segments() {
        let pattern = Pattern::parse("sites/:id").unwrap();
        assert_eq!(
            pattern.segments(),
            [Segment::Literal("sites".into()), Segment::Param("id".into())]
        );
        assert!(Pattern::parse("/").unwrap().is_root());
        assert!(Pattern::parse("").unwrap().is_root());
    }

    #[test]
    fn test_parse_rejects_bad_params() {
        assert_eq!(
            Pattern::parse("job/:"),
            Err(PatternError::EmptyParamName(1))
        );
        assert_eq!(
            Pattern::parse("a/:id/b/:id"),
            Err(PatternError::DuplicateParam("id".into()))
        );
    }

    #[test]
    fn test_literal_and_named_matching() {
        let pattern = Pattern::parse("job/:id").unwrap();

        let params = pattern.match_segments(&segs("job/42")).unwrap();
        assert_eq!(params.get("id"), Some("42"));

        assert!(pattern.match_segments(&segs("Job/42")).is_none());
        assert!(pattern.match_segments(&segs("job")).is_none());
        assert!(pattern.match_segments(&segs("job/42/log")).is_none());
    }

    #[test]
    fn test_same_shape_ignores_param_names() {
        let a = Pattern::parse("/job/:id").unwrap();
        let b = Pattern::parse("job/:job_id/").unwrap();
        let c = Pattern::parse("job/latest").unwrap();
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
    }

    #[test]
    fn test_expand() {
        let pattern = Pattern::parse("sites/:id").unwrap();
        let params: Params = [("id", "7")].into_iter().collect();
        assert_eq!(pattern.expand("site", &params).unwrap(), "/sites/7");
        assert_eq!(
            Pattern::parse("/").unwrap().expand("index", &Params::new()).unwrap(),
            "/"
        );

        let err = pattern.expand("site", &Params::new()).unwrap_err();
        assert_eq!(
            err,
            ReverseError::MissingParam {
                route: "site".into(),
                param: "id".into()
            }
        );

        let bad: Params = [("id", "a/b")].into_iter().collect();
        assert!(matches!(
            pattern.expand("site", &bad),
            Err(ReverseError::InvalidParam { .. })
        ));
    }

    #[test]
    fn test_expand_rejects_query_and_fragment_markers() {
        let pattern = Pattern::parse("job/:id").unwrap();
        for value in ["a?b", "a#b", "?", "#top"] {
            let params: Params = [("id", value)].into_iter().collect();
            assert_eq!(
                pattern.expand("job", &params),
                Err(ReverseError::InvalidParam {
                    param: "id".into(),
                    value: value.into()
                }),
                "value {value:?}"
            );
        }

        // Other punctuation stays verbatim and matches back.
        let params: Params = [("id", "a-b_c.d")].into_iter().collect();
        let path = pattern.expand("job", &params).unwrap();
        assert_eq!(path, "/job/a-b_c.d");
        assert_eq!(pattern.match_segments(&segs(&path)), Some(params));
    }
}
