//! Route dispatcher and view mounter.
//!
//! # Responsibilities
//! - Own the route table and the single mounted view
//! - Attach to an output node (`start`)
//! - Re-match and remount on every navigation
//! - Leave the view in place when a navigation resolves to it again
//!
//! # Design Decisions
//! - Synchronous: every navigation completes before the next is handled
//! - Replace, never patch: a different match unmounts then mounts
//! - Same route with same bindings is a no-op for the host (no flicker)

use std::time::Instant;

use serde::Serialize;

use crate::dispatch::error::MountError;
use crate::host::{Host, NavigationEvent};
use crate::observability::metrics;
use crate::observability::tracing::{navigation_span, NavigationId};
use crate::routing::{
    ConfigurationError, Location, Params, ReverseError, Route, RouteEntry, RouteRef, RouteTable,
};
use crate::views::{View, ViewContext};

/// The view currently mounted in the output node.
#[derive(Debug, Clone, Serialize)]
pub struct Mounted {
    navigation_id: NavigationId,
    #[serde(skip)]
    target: RouteRef,
    route: String,
    view: String,
    params: Params,
    #[serde(serialize_with = "serialize_display")]
    location: Location,
}

impl Mounted {
    /// ID of the navigation that mounted this view.
    pub fn navigation_id(&self) -> NavigationId {
        self.navigation_id
    }

    pub fn target(&self) -> RouteRef {
        self.target
    }

    pub fn is_fallback(&self) -> bool {
        self.target == RouteRef::Fallback
    }

    /// Route label (name, or pattern if unnamed).
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The most recent location that resolved to this view.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// What a location would resolve to, without mounting anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub location: String,
    pub route: String,
    pub name: Option<String>,
    /// `None` for the fallback.
    pub pattern: Option<String>,
    pub view: String,
    pub fallback: bool,
    pub params: Params,
}

/// Keeps exactly one view mounted for the host's current location.
#[derive(Debug)]
pub struct Dispatcher<V> {
    table: RouteTable<V>,
    node: Option<String>,
    mounted: Option<Mounted>,
}

impl<V: View> Dispatcher<V> {
    /// Validate and register a route table.
    pub fn register(
        routes: Vec<RouteEntry<V>>,
        fallback: Option<RouteEntry<V>>,
    ) -> Result<Self, ConfigurationError> {
        let table = RouteTable::new(routes, fallback)?;
        tracing::debug!(routes = table.routes().len(), "Route table registered");
        Ok(Self::from_table(table))
    }

    pub fn from_table(table: RouteTable<V>) -> Self {
        Self {
            table,
            node: None,
            mounted: None,
        }
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    /// Output node id, once started.
    pub fn node(&self) -> Option<&str> {
        self.node.as_deref()
    }

    pub fn is_started(&self) -> bool {
        self.node.is_some()
    }

    pub fn mounted(&self) -> Option<&Mounted> {
        self.mounted.as_ref()
    }

    pub fn mounted_view(&self) -> Option<&V> {
        self.mounted
            .as_ref()
            .and_then(|m| self.table.get(m.target))
            .map(Route::view)
    }

    /// Attach to `node` and mount the view for the host's current location.
    ///
    /// Restarting on another node unmounts from the old one first.
    pub fn start<H: Host>(&mut self, host: &mut H, node: &str) -> Result<&Mounted, MountError> {
        if !host.has_node(node) {
            tracing::error!(node = %node, "Output node does not exist");
            return Err(MountError::NodeNotFound(node.to_string()));
        }
        if self.is_started() {
            self.stop(host)?;
        }

        self.node = Some(node.to_string());
        tracing::info!(node = %node, routes = self.table.routes().len(), "Dispatcher started");

        let location = host.location();
        self.dispatch(host, location)
    }

    /// Location changed: re-match and remount if needed.
    pub fn navigate<H: Host>(
        &mut self,
        host: &mut H,
        location: impl Into<Location>,
    ) -> Result<&Mounted, MountError> {
        self.dispatch(host, location.into())
    }

    /// Handle a navigation event delivered by the host.
    pub fn handle<H: Host>(
        &mut self,
        host: &mut H,
        event: NavigationEvent,
    ) -> Result<&Mounted, MountError> {
        tracing::trace!(kind = ?event.kind, "Navigation event received");
        self.dispatch(host, event.location)
    }

    /// Unmount the current view and detach from the output node.
    pub fn stop<H: Host>(&mut self, host: &mut H) -> Result<(), MountError> {
        let Some(node) = self.node.as_deref() else {
            return Ok(());
        };
        if let Some(previous) = &self.mounted {
            host.unmount(node)?;
            tracing::debug!(node = %node, view = %previous.view, "Unmounted view");
        }
        tracing::info!(node = %node, "Dispatcher stopped");
        self.node = None;
        self.mounted = None;
        Ok(())
    }

    /// Match a location without touching the host.
    pub fn resolve(&self, location: &Location) -> Resolution {
        let matched = self.table.lookup(location);
        Resolution {
            location: location.to_string(),
            route: matched.route.label().to_string(),
            name: matched.route.name().map(str::to_string),
            pattern: (!matched.is_fallback()).then(|| matched.route.pattern().to_string()),
            view: matched.route.view().name().to_string(),
            fallback: matched.is_fallback(),
            params: matched.params,
        }
    }

    /// Path for a named route.
    pub fn href(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
        self.table.href(name, params)
    }

    fn dispatch<H: Host>(&mut self, host: &mut H, location: Location) -> Result<&Mounted, MountError> {
        let node = self.node.clone().ok_or(MountError::NotStarted)?;
        let start_time = Instant::now();
        let navigation_id = NavigationId::new();
        let span = navigation_span(navigation_id, &location);
        let _enter = span.enter();

        let matched = self.table.lookup(&location);
        let label = matched.route.label();

        let next = match self.mounted.take() {
            Some(current) if current.target == matched.target && current.params == matched.params => {
                metrics::record_remount_skipped(label);
                tracing::debug!(route = %label, "Already mounted, keeping view");
                Mounted { location, ..current }
            }
            previous => {
                if let Some(previous) = previous {
                    if let Err(e) = host.unmount(&node) {
                        tracing::error!(node = %node, error = %e, "Unmount failed, keeping mounted view");
                        self.mounted = Some(previous);
                        return Err(e);
                    }
                    tracing::debug!(route = %previous.route, view = %previous.view, "Unmounted view");
                }

                let view = matched.route.view();
                let content = view.render(&ViewContext {
                    params: &matched.params,
                    location: &location,
                });
                host.mount(&node, view.name(), content)?;

                let fallback = matched.is_fallback();
                if fallback {
                    tracing::info!(view = %view.name(), "No route matched, mounted fallback");
                } else {
                    tracing::info!(route = %label, view = %view.name(), params = ?matched.params, "Mounted view");
                }
                metrics::record_dispatch(label, fallback, start_time);

                Mounted {
                    navigation_id,
                    target: matched.target,
                    route: label.to_string(),
                    view: view.name().to_string(),
                    params: matched.params,
                    location,
                }
            }
        };

        let mounted: &Mounted = self.mounted.insert(next);
        Ok(mounted)
    }
}

fn serialize_display<S: serde::Serializer>(location: &Location, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{MemoryHost, Mutation};
    use crate::views::Page;

    fn dashboard() -> Dispatcher<Page> {
        Dispatcher::register(
            vec![
                RouteEntry::new("/", Page::Index).named("index").as_default(),
                RouteEntry::new("job/:id", Page::Job).named("job"),
                RouteEntry::new("sites", Page::SitesList).named("sites"),
                RouteEntry::new("sites/:id", Page::SiteDetail).named("site"),
            ],
            Some(RouteEntry::fallback(Page::NotFound)),
        )
        .unwrap()
    }

    #[test]
    fn test_start_mounts_current_location() {
        let mut host = MemoryHost::with_node("content", "/job/42");
        let mut dispatcher = dashboard();

        let mounted = dispatcher.start(&mut host, "content").unwrap();
        assert_eq!(mounted.view(), "job");
        assert_eq!(mounted.params().get("id"), Some("42"));
        assert_eq!(dispatcher.mounted_view(), Some(&Page::Job));
        assert!(host.document.content("content").unwrap().contains("Job 42"));
    }

    #[test]
    fn test_start_without_node_fails() {
        let mut host = MemoryHost::with_node("sidebar", "/");
        let mut dispatcher = dashboard();

        assert_eq!(
            dispatcher.start(&mut host, "content").unwrap_err(),
            MountError::NodeNotFound("content".into())
        );
        assert!(!dispatcher.is_started());
        assert!(host.document.mutations().is_empty());
    }

    #[test]
    fn test_navigate_before_start_fails() {
        let mut host = MemoryHost::with_node("content", "/");
        let mut dispatcher = dashboard();
        assert_eq!(
            dispatcher.navigate(&mut host, "/sites").unwrap_err(),
            MountError::NotStarted
        );
    }

    #[test]
    fn test_same_location_does_not_remount() {
        let mut host = MemoryHost::with_node("content", "/sites/7");
        let mut dispatcher = dashboard();
        let first = dispatcher.start(&mut host, "content").unwrap().navigation_id();

        let again = dispatcher.navigate(&mut host, "sites/7/").unwrap();
        assert_eq!(again.navigation_id(), first);
        assert_eq!(host.document.mount_count(), 1);
    }

    #[test]
    fn test_changed_binding_remounts() {
        let mut host = MemoryHost::with_node("content", "/job/1");
        let mut dispatcher = dashboard();
        dispatcher.start(&mut host, "content").unwrap();
        dispatcher.navigate(&mut host, "/job/2").unwrap();

        assert_eq!(
            host.document.mutations(),
            [
                Mutation::Mount { node: "content".into(), view: "job".into() },
                Mutation::Unmount { node: "content".into(), view: "job".into() },
                Mutation::Mount { node: "content".into(), view: "job".into() },
            ]
        );
        assert!(host.document.content("content").unwrap().contains("Job 2"));
    }

    #[test]
    fn test_query_change_keeps_view_but_updates_location() {
        let mut host = MemoryHost::with_node("content", "/job/1");
        let mut dispatcher = dashboard();
        dispatcher.start(&mut host, "content").unwrap();

        let mounted = dispatcher.navigate(&mut host, "/job/1?tab=log").unwrap();
        assert_eq!(mounted.location().query_param("tab"), Some("log"));
        assert_eq!(host.document.mount_count(), 1);
    }

    #[test]
    fn test_stop_unmounts() {
        let mut host = MemoryHost::with_node("content", "/");
        let mut dispatcher = dashboard();
        dispatcher.start(&mut host, "content").unwrap();
        dispatcher.stop(&mut host).unwrap();

        assert!(dispatcher.mounted().is_none());
        assert_eq!(host.document.mounted_view("content"), None);
        assert_eq!(
            dispatcher.navigate(&mut host, "/").unwrap_err(),
            MountError::NotStarted
        );
    }

    #[test]
    fn test_failed_unmount_keeps_mounted_record() {
        let mut host = MemoryHost::with_node("content", "/sites");
        let mut dispatcher = dashboard();
        dispatcher.start(&mut host, "content").unwrap();
        host.document.remove_node("content");

        assert_eq!(
            dispatcher.navigate(&mut host, "/job/1").unwrap_err(),
            MountError::NodeNotFound("content".into())
        );
        assert_eq!(dispatcher.mounted_view(), Some(&Page::SitesList));
        assert_eq!(dispatcher.mounted().unwrap().location().path(), "/sites");

        assert!(dispatcher.stop(&mut host).is_err());
        assert!(dispatcher.is_started());
        assert_eq!(dispatcher.mounted_view(), Some(&Page::SitesList));

        // Once the node is back, navigation resumes from the kept record.
        host.document.add_node("content");
        let mounted = dispatcher.navigate(&mut host, "/job/1").unwrap();
        assert_eq!(mounted.view(), "job");
        assert_eq!(host.document.mounted_view("content"), Some("job"));
    }

    #[test]
    fn test_restart_on_other_node_moves_view() {
        let mut host = MemoryHost::new(
            crate::host::Document::with_nodes(["content", "main"]),
            "/sites",
        );
        let mut dispatcher = dashboard();
        dispatcher.start(&mut host, "content").unwrap();
        dispatcher.start(&mut host, "main").unwrap();

        assert_eq!(host.document.mounted_view("content"), None);
        assert_eq!(host.document.mounted_view("main"), Some("sites_list"));
    }

    #[test]
    fn test_resolve_does_not_mount() {
        let dispatcher = dashboard();
        let resolution = dispatcher.resolve(&Location::parse("unknown/path"));
        assert!(resolution.fallback);
        assert_eq!(resolution.view, "not_found");
        assert_eq!(resolution.pattern, None);
        assert!(resolution.params.is_empty());
        assert!(dispatcher.mounted().is_none());
    }

    #[test]
    fn test_mounted_serializes_location_as_string() {
        let mut host = MemoryHost::with_node("content", "/sites/7");
        let mut dispatcher = dashboard();
        let mounted = dispatcher.start(&mut host, "content").unwrap();

        let json = serde_json::to_value(mounted).unwrap();
        assert_eq!(json["location"], "/sites/7");
        assert_eq!(json["params"]["id"], "7");
        assert_eq!(json["route"], "site");
    }
}
