//! Dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! register(routes, fallback)
//!     → RouteTable (validated, immutable)
//!
//! start(host, node) / navigation event
//!     → RouteTable::lookup (route + params, or fallback)
//!     → same route + params as mounted? keep it
//!     → otherwise: Host::unmount → View::render → Host::mount
//! ```

pub mod dispatcher;
pub mod error;

pub use dispatcher::{Dispatcher, Mounted, Resolution};
pub use error::MountError;
