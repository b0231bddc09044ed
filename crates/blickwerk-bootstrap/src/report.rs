// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Startup timing report.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timing record for one completed initialisation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTiming {
    /// Step name, as declared in the coordinator's step list.
    pub name: String,
    /// Wall-clock duration of the step's action.
    pub duration: Duration,
}

/// Summary of the one successful initialisation pass.
///
/// Produced exactly once per process, after the last step completes, and
/// retained by the coordinator so diagnostics can show what startup cost.
/// Serialisable so the app can persist the last boot timing next to its
/// config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartupReport {
    /// When the pass finished.
    pub completed_at: DateTime<Utc>,
    /// Per-step timings, in execution order.
    pub steps: Vec<StepTiming>,
    /// Wall-clock duration of the whole pass. At least the sum of the step
    /// durations (the pass also pays for timing and observer calls).
    pub total: Duration,
}

impl StartupReport {
    /// Sum of the per-step durations (excludes coordinator overhead).
    pub fn steps_total(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}
