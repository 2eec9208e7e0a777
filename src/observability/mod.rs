//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (one span per navigation, with navigation ID)
//!
//! Consumers:
//!     → stderr (pretty or JSON)
//!     → whatever metrics recorder the embedder installs
//! ```
//!
//! # Design Decisions
//! - Navigation ID flows through every mount/unmount event
//! - Metrics are recorded through the facade only

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::tracing::NavigationId;
