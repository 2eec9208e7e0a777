//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation (raw location string)
//!     → location.rs (normalize path, split query)
//!     → router.rs (ordered route lookup)
//!     → matcher.rs (evaluate segment conditions)
//!     → Return: matched Route + Params, or the fallback
//!
//! Route Compilation (at startup):
//!     RouteEntry[]
//!     → pattern.rs (parse literal / named segments)
//!     → Validate (duplicates, names, defaults)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Declaration order is the only priority
//! - Deterministic: same location always matches same route
//! - Lookup is total: the fallback absorbs everything else

pub mod error;
pub mod location;
pub mod matcher;
pub mod params;
pub mod pattern;
pub mod router;

pub use error::{ConfigurationError, PatternError, ReverseError};
pub use location::Location;
pub use params::Params;
pub use pattern::{Pattern, Segment};
pub use router::{validate_entries, Route, RouteEntry, RouteMatch, RouteRef, RouteTable};
