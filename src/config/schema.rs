//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::dispatch::Dispatcher;
use crate::routing::{ConfigurationError, RouteEntry};
use crate::views::Page;

/// Root configuration for the dashboard router.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Element id of the output node views are mounted into.
    pub mount_node: String,

    /// Ordered route definitions. First match wins.
    pub routes: Vec<RouteConfig>,

    /// View mounted when no route matches.
    pub fallback: Option<FallbackConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            mount_node: "content".to_string(),
            routes: vec![
                RouteConfig::new("/", Page::Index, "index").as_default(),
                RouteConfig::new("job/:id", Page::Job, "job"),
                RouteConfig::new("sites", Page::SitesList, "sites"),
                RouteConfig::new("sites/:id", Page::SiteDetail, "site"),
            ],
            fallback: Some(FallbackConfig {
                view: Page::NotFound,
                name: Some("not_found".to_string()),
            }),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl RouterConfig {
    /// Route entries in declaration order.
    pub fn entries(&self) -> Vec<RouteEntry<Page>> {
        self.routes.iter().map(RouteConfig::entry).collect()
    }

    pub fn fallback_entry(&self) -> Option<RouteEntry<Page>> {
        self.fallback.as_ref().map(FallbackConfig::entry)
    }

    /// Register the configured table with a fresh dispatcher.
    pub fn build_dispatcher(&self) -> Result<Dispatcher<Page>, ConfigurationError> {
        Dispatcher::register(self.entries(), self.fallback_entry())
    }
}

/// A single route: pattern to page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `sites/:id`.
    pub pattern: String,

    /// Page mounted for this route.
    pub view: Page,

    /// Symbolic name for links and logs.
    #[serde(default)]
    pub name: Option<String>,

    /// Also mount this route at the root location.
    #[serde(default)]
    pub default: bool,
}

impl RouteConfig {
    pub fn new(pattern: &str, view: Page, name: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            view,
            name: Some(name.to_string()),
            default: false,
        }
    }

    pub fn as_default(mut self) -> Self {
        self.default = true;
        self
    }

    pub fn entry(&self) -> RouteEntry<Page> {
        RouteEntry {
            pattern: self.pattern.clone(),
            view: self.view,
            name: self.name.clone(),
            default: self.default,
        }
    }
}

/// The not-found route. It has no pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    pub view: Page,

    #[serde(default)]
    pub name: Option<String>,
}

impl FallbackConfig {
    pub fn entry(&self) -> RouteEntry<Page> {
        let entry = RouteEntry::fallback(self.view);
        match &self.name {
            Some(name) => entry.named(name.clone()),
            None => entry,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
