//! Client-side route dispatch for the crawler dashboard.

pub mod config;
pub mod dispatch;
pub mod host;
pub mod observability;
pub mod routing;
pub mod shell;
pub mod views;

pub use config::RouterConfig;
pub use dispatch::{Dispatcher, MountError, Mounted};
pub use host::{Host, MemoryHost};
pub use routing::{ConfigurationError, Location, Params, RouteEntry};
pub use views::{Page, View};
