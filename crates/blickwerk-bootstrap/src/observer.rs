// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Observability sink for initialisation timings.

use std::time::Duration;

use tracing::info;

/// Receives timing events from the bootstrap coordinator.
///
/// Notifications are one-way; implementations must not block for long —
/// they run inline between steps while the exclusive guard is held.
pub trait InitObserver: Send + Sync {
    /// A named step completed successfully after `elapsed`.
    fn step_completed(&self, name: &str, elapsed: Duration);

    /// The full pass completed successfully after `total`.
    fn pass_completed(&self, total: Duration);
}

/// Default observer forwarding timings to `tracing`.
pub struct TracingObserver;

impl InitObserver for TracingObserver {
    fn step_completed(&self, name: &str, elapsed: Duration) {
        info!(
            step = name,
            elapsed_ms = elapsed.as_millis() as u64,
            "initialisation step complete"
        );
    }

    fn pass_completed(&self, total: Duration) {
        info!(
            total_ms = total.as_millis() as u64,
            "application initialisation complete"
        );
    }
}
