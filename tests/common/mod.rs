//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use dashboard_router::config::RouterConfig;
use dashboard_router::dispatch::Dispatcher;
use dashboard_router::host::MemoryHost;
use dashboard_router::views::Page;

pub const NODE: &str = "content";

/// The dashboard table, started on a fresh memory host at `initial`.
pub fn started_dashboard(initial: &str) -> (Dispatcher<Page>, MemoryHost) {
    let mut host = MemoryHost::with_node(NODE, initial);
    let mut dispatcher = RouterConfig::default().build_dispatcher().unwrap();
    dispatcher.start(&mut host, NODE).unwrap();
    (dispatcher, host)
}

/// A unique scratch file path for this test process.
pub fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "dashboard-router-{}-{}.toml",
        name,
        std::process::id()
    ))
}
