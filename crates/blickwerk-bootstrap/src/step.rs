// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tagged initialisation steps.

use std::future::Future;
use std::pin::Pin;

use blickwerk_core::error::Result;

/// Stored form of a step's asynchronous action.
///
/// The coordinator may invoke the action again on a retry pass, hence `Fn`
/// rather than `FnOnce`.
pub type StepAction =
    Box<dyn Fn() -> Pin<Box<dyn Future<Output = Result<()>> + Send>> + Send + Sync>;

/// One named unit of initialisation work.
///
/// Steps are defined once at startup; the coordinator owns them for the
/// lifetime of the process and runs them in declaration order. The name
/// exists purely for observability — timing events and failure reports are
/// tagged with it.
pub struct InitStep {
    name: String,
    action: StepAction,
}

impl InitStep {
    /// Create a step from a name and an async action.
    pub fn new<F, Fut>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            name: name.into(),
            action: Box::new(move || {
                Box::pin(action()) as Pin<Box<dyn Future<Output = Result<()>> + Send>>
            }),
        }
    }

    /// The step's observability tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the step's action to completion.
    pub(crate) async fn run(&self) -> Result<()> {
        (self.action)().await
    }
}

// Hand-written because the boxed action has no useful Debug form.
impl std::fmt::Debug for InitStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitStep").field("name", &self.name).finish()
    }
}
