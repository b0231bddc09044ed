// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blickwerk — Application bootstrap coordinator.
//
// Runs a fixed, ordered list of named asynchronous initialisation steps
// exactly once per process, no matter how many UI entry points, deep-link
// handlers, or lifecycle callbacks ask for initialisation concurrently.
// Per-step and total wall-clock timings are surfaced through an observer
// and through `tracing`.
//
// The contract, in short:
//
// - steps run strictly in declaration order, never concurrently;
// - concurrent callers converge on one pass and share its outcome;
// - once initialised, callers return immediately without locking;
// - a failed pass leaves no bookkeeping behind — the next call retries the
//   whole sequence from the first step, so steps must tolerate re-runs.

pub mod coordinator;
pub mod observer;
pub mod report;
pub mod step;

pub use coordinator::Bootstrap;
pub use observer::{InitObserver, TracingObserver};
pub use report::{StartupReport, StepTiming};
pub use step::InitStep;
