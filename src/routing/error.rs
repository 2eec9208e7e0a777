//! Route table error definitions.

use thiserror::Error;

/// Errors produced while parsing a single path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A `:` segment with nothing after it.
    #[error("named segment at position {0} has no name")]
    EmptyParamName(usize),

    /// The same parameter name bound twice in one pattern.
    #[error("parameter `{0}` appears more than once")]
    DuplicateParam(String),
}

/// Structural problems in a route table, raised at registration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No routes and no fallback: nothing could ever be mounted.
    #[error("route table is empty and no fallback was supplied")]
    Empty,

    /// Routes were given but no fallback for unmatched locations.
    #[error("route table has {0} routes but no fallback")]
    MissingFallback(usize),

    /// A pattern failed to parse.
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },

    /// Two entries share the same pattern shape; the later one is unreachable.
    #[error("pattern `{duplicate}` (entry {index}) duplicates `{original}` (entry {first})")]
    DuplicatePattern {
        original: String,
        duplicate: String,
        first: usize,
        index: usize,
    },

    /// Two entries share a symbolic name.
    #[error("route name `{0}` is used more than once")]
    DuplicateName(String),

    /// More than one entry claims to be the default route.
    #[error("multiple default routes: entries {first} and {index}")]
    MultipleDefaults { first: usize, index: usize },
}

/// Errors from reverse URL generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    /// No route carries the requested name.
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    /// The pattern needs a parameter the caller did not provide.
    #[error("route `{route}` requires parameter `{param}`")]
    MissingParam { route: String, param: String },

    /// A parameter value was empty or contained `/`, `?` or `#`.
    #[error("value for `{param}` is not a single path segment (empty, or holds `/`, `?` or `#`): {value:?}")]
    InvalidParam { param: String, value: String },
}
