//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Validate and compile route entries into an immutable table
//! - Look up the matching route for a location
//! - Resolve to the fallback when nothing matches
//! - Reverse-generate paths for named routes
//!
//! # Design Decisions
//! - Immutable after construction
//! - O(n) scan in declaration order; first match wins, no backtracking
//! - The fallback is part of the table, so lookup is total

use std::collections::HashMap;

use crate::routing::error::{ConfigurationError, ReverseError};
use crate::routing::location::Location;
use crate::routing::matcher::{AnyMatcher, CatchAllMatcher, Matcher, PatternMatcher, RootMatcher};
use crate::routing::params::Params;
use crate::routing::pattern::Pattern;

/// Pattern used by [`RouteEntry::fallback`]. The fallback is never matched by pattern.
pub const FALLBACK_PATTERN: &str = "*";

/// A route as supplied by the caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<V> {
    pub pattern: String,
    pub view: V,
    pub name: Option<String>,
    pub default: bool,
}

impl<V> RouteEntry<V> {
    pub fn new(pattern: impl Into<String>, view: V) -> Self {
        Self {
            pattern: pattern.into(),
            view,
            name: None,
            default: false,
        }
    }

    /// A catch-all entry for use as the table's fallback.
    pub fn fallback(view: V) -> Self {
        Self::new(FALLBACK_PATTERN, view)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Also select this entry for the root location.
    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }
}

/// Identifies a route within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteRef {
    Entry(usize),
    Fallback,
}

/// A compiled route.
#[derive(Debug)]
pub struct Route<V> {
    pattern: Pattern,
    view: V,
    name: Option<String>,
    default: bool,
    matcher: Box<dyn Matcher>,
}

impl<V> Route<V> {
    fn compile(entry: RouteEntry<V>, matcher: Box<dyn Matcher>) -> Result<Self, ConfigurationError> {
        let pattern = parse_pattern(&entry.pattern)?;
        Ok(Self {
            pattern,
            view: entry.view,
            name: entry.name,
            default: entry.default,
            matcher,
        })
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_default(&self) -> bool {
        self.default
    }

    /// Name if present, otherwise the pattern. Used in logs and metrics.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.pattern.as_str())
    }
}

/// Result of a lookup: always a route, possibly the fallback.
#[derive(Debug)]
pub struct RouteMatch<'a, V> {
    pub route: &'a Route<V>,
    pub target: RouteRef,
    pub params: Params,
}

impl<V> RouteMatch<'_, V> {
    pub fn is_fallback(&self) -> bool {
        self.target == RouteRef::Fallback
    }
}

/// Ordered, validated route table with a fallback.
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    fallback: Route<V>,
}

impl<V> RouteTable<V> {
    /// Validate and compile. Reports the first problem found; use
    /// [`validate_entries`] to see all of them.
    pub fn new(
        entries: Vec<RouteEntry<V>>,
        fallback: Option<RouteEntry<V>>,
    ) -> Result<Self, ConfigurationError> {
        if let Some(err) = validate_entries(&entries, fallback.as_ref()).into_iter().next() {
            return Err(err);
        }
        let fallback = match fallback {
            Some(fallback) => fallback,
            None if entries.is_empty() => return Err(ConfigurationError::Empty),
            None => return Err(ConfigurationError::MissingFallback(entries.len())),
        };

        let routes = entries
            .into_iter()
            .map(|entry| {
                let pattern = parse_pattern(&entry.pattern)?;
                let matcher: Box<dyn Matcher> = if entry.default && !pattern.is_root() {
                    Box::new(AnyMatcher::new(vec![
                        Box::new(PatternMatcher::new(pattern)),
                        Box::new(RootMatcher),
                    ]))
                } else {
                    Box::new(PatternMatcher::new(pattern))
                };
                Route::compile(entry, matcher)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            routes,
            fallback: Route::compile(fallback, Box::new(CatchAllMatcher))?,
        })
    }

    /// Find the route for a location. Never fails: unmatched locations get the fallback.
    pub fn lookup(&self, location: &Location) -> RouteMatch<'_, V> {
        for (index, route) in self.routes.iter().enumerate() {
            if let Some(params) = route.matcher.matches(location) {
                return RouteMatch {
                    route,
                    target: RouteRef::Entry(index),
                    params,
                };
            }
        }
        RouteMatch {
            route: &self.fallback,
            target: RouteRef::Fallback,
            params: Params::new(),
        }
    }

    pub fn get(&self, target: RouteRef) -> Option<&Route<V>> {
        match target {
            RouteRef::Entry(index) => self.routes.get(index),
            RouteRef::Fallback => Some(&self.fallback),
        }
    }

    /// Reverse-generate the path of a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
        let route = self
            .routes
            .iter()
            .find(|r| r.name() == Some(name))
            .ok_or_else(|| ReverseError::UnknownRoute(name.to_string()))?;
        route.pattern.expand(name, params)
    }

    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn fallback(&self) -> &Route<V> {
        &self.fallback
    }
}

fn parse_pattern(raw: &str) -> Result<Pattern, ConfigurationError> {
    Pattern::parse(raw).map_err(|source| ConfigurationError::InvalidPattern {
        pattern: raw.to_string(),
        source,
    })
}

/// Check a route table without building it. Returns every problem, in table order.
pub fn validate_entries<V>(
    entries: &[RouteEntry<V>],
    fallback: Option<&RouteEntry<V>>,
) -> Vec<ConfigurationError> {
    let mut errors = Vec::new();

    match fallback {
        None if entries.is_empty() => errors.push(ConfigurationError::Empty),
        None => errors.push(ConfigurationError::MissingFallback(entries.len())),
        Some(fallback) => {
            if let Err(err) = parse_pattern(&fallback.pattern) {
                errors.push(err);
            }
        }
    }

    let mut parsed: Vec<(usize, Pattern)> = Vec::new();
    let mut names: HashMap<&str, usize> = HashMap::new();
    let mut first_default: Option<usize> = None;

    for (index, entry) in entries.iter().enumerate() {
        match parse_pattern(&entry.pattern) {
            Ok(pattern) => {
                if let Some((first, original)) = parsed.iter().find(|(_, p)| p.same_shape(&pattern)) {
                    errors.push(ConfigurationError::DuplicatePattern {
                        original: original.as_str().to_string(),
                        duplicate: entry.pattern.clone(),
                        first: *first,
                        index,
                    });
                } else {
                    parsed.push((index, pattern));
                }
            }
            Err(err) => errors.push(err),
        }

        if let Some(name) = entry.name.as_deref() {
            if names.insert(name, index).is_some() {
                errors.push(ConfigurationError::DuplicateName(name.to_string()));
            }
        }

        if entry.default {
            match first_default {
                Some(first) => errors.push(ConfigurationError::MultipleDefaults { first, index }),
                None => first_default = Some(index),
            }
        }
    }

    if let Some(name) = fallback.and_then(|f| f.name.as_deref()) {
        if names.contains_key(name) {
            errors.push(ConfigurationError::DuplicateName(name.to_string()));
        }
    }

    errors
}
