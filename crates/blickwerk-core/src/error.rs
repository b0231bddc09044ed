// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Blickwerk.

use thiserror::Error;

/// Top-level error type for all Blickwerk operations.
#[derive(Debug, Error)]
pub enum BlickwerkError {
    // -- Bootstrap errors --
    /// A named initialisation step failed. The sequence aborts at this step
    /// and the next `ensure_initialized` call restarts from the beginning.
    #[error("initialisation step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<BlickwerkError>,
    },

    // -- Resource errors --
    #[error("resource not found: {0}")]
    ResourceUnavailable(String),

    // -- Model errors --
    #[error("face-match model rejected: {0}")]
    ModelInvalid(String),

    #[error("integrity check failed: expected {expected}, got {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

impl BlickwerkError {
    /// Wrap `cause` as the failure of the initialisation step `step`.
    pub fn step_failed(step: impl Into<String>, cause: BlickwerkError) -> Self {
        Self::StepFailed {
            step: step.into(),
            source: Box::new(cause),
        }
    }

    /// Name of the initialisation step this error originated from, if any.
    pub fn failing_step(&self) -> Option<&str> {
        match self {
            Self::StepFailed { step, .. } => Some(step),
            _ => None,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BlickwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_failure_names_the_step() {
        let err = BlickwerkError::step_failed(
            "facematch-model",
            BlickwerkError::ResourceUnavailable("files/facenet_512.tflite".into()),
        );
        assert_eq!(err.failing_step(), Some("facematch-model"));
        let msg = err.to_string();
        assert!(msg.contains("facematch-model"), "message was: {msg}");
        assert!(msg.contains("resource not found"), "message was: {msg}");
    }

    #[test]
    fn non_step_errors_have_no_step_name() {
        assert_eq!(BlickwerkError::PlatformUnavailable.failing_step(), None);
    }
}
