//! Navigation correlation.
//!
//! # Responsibilities
//! - Tag every navigation with a unique ID
//! - Create the span that mount/unmount events are logged under
//!
//! # Design Decisions
//! - UUID v4, like a request ID; no ordering is implied
//! - One span per navigation, entered for the duration of the dispatch

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::routing::Location;

/// Unique ID of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NavigationId(Uuid);

impl NavigationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NavigationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NavigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Span covering one dispatch.
pub fn navigation_span(id: NavigationId, location: &Location) -> ::tracing::Span {
    ::tracing::info_span!("navigate", navigation_id = %id, location = %location)
}
