//! Metrics collection.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): mounts by route label
//! - `router_fallback_total` (counter): locations that matched nothing
//! - `router_remount_skipped_total` (counter): navigations that left the view in place
//! - `router_dispatch_duration_seconds` (histogram): match + render + mount time
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; installing a recorder is the embedder's job
//! - Labels are route labels (name or pattern), never raw locations

use std::time::Instant;

use metrics::{counter, histogram};

/// Record a completed mount.
pub fn record_dispatch(route: &str, fallback: bool, start_time: Instant) {
    counter!("router_dispatch_total", "route" => route.to_string()).increment(1);
    if fallback {
        counter!("router_fallback_total").increment(1);
    }
    histogram!("router_dispatch_duration_seconds", "route" => route.to_string())
        .record(start_time.elapsed().as_secs_f64());
}

/// Record a navigation that resolved to the already-mounted view.
pub fn record_remount_skipped(route: &str) {
    counter!("router_remount_skipped_total", "route" => route.to_string()).increment(1);
}
