//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! routes file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → build_dispatcher() registers the route table
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new config sent to the owner, which rebuilds its dispatcher
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults; an empty file yields the dashboard table
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::FallbackConfig;
pub use schema::LogFormat;
pub use schema::ObservabilityConfig;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
pub use validation::ValidationError;
