//! Route matching logic.
//!
//! # Responsibilities
//! - Match location segments against a pattern (literal + named)
//! - Match the root location for the default route
//! - Combine conditions with OR semantics (first success wins)
//!
//! # Design Decisions
//! - Literal matching is case-sensitive
//! - Named segments match any non-empty segment
//! - No regex, no backtracking: O(segments) per pattern

use crate::routing::location::Location;
use crate::routing::params::Params;
use crate::routing::pattern::Pattern;

/// Trait for matching locations against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the bound parameters if the location matches this condition.
    fn matches(&self, location: &Location) -> Option<Params>;
}

/// Matches a parsed path pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Pattern,
}

impl PatternMatcher {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, location: &Location) -> Option<Params> {
        self.pattern.match_segments(location.segments())
    }
}

/// Matches only the root location. Used for the default route.
#[derive(Debug, Clone, Copy)]
pub struct RootMatcher;

impl Matcher for RootMatcher {
    fn matches(&self, location: &Location) -> Option<Params> {
        location.is_root().then(Params::new)
    }
}

/// Matches every location with no bindings. Used for the fallback.
#[derive(Debug, Clone, Copy)]
pub struct CatchAllMatcher;

impl Matcher for CatchAllMatcher {
    fn matches(&self, _location: &Location) -> Option<Params> {
        Some(Params::new())
    }
}

/// Combines multiple matchers with OR semantics.
#[derive(Debug)]
pub struct AnyMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AnyMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AnyMatcher {
    fn matches(&self, location: &Location) -> Option<Params> {
        self.matchers.iter().find_map(|m| m.matches(location))
    }
}
