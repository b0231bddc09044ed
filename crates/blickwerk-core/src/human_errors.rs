// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for vulnerable users (elderly, children).
//
// Every technical error is mapped to plain English with a clear suggestion.
// The taxonomy uses three severity levels that drive UI presentation.

use crate::error::BlickwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Momentary hiccup — retrying (automatically or via a tap) may fix it.
    Transient,
    /// User must do something (free up storage, reinstall the app).
    ActionRequired,
    /// Cannot be fixed by retrying — damaged bundle, unsupported platform.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the system should auto-retry.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BlickwerkError` into a `HumanError` that a grandparent can understand.
pub fn humanize_error(err: &BlickwerkError) -> HumanError {
    match err {
        // Unwrap to the underlying cause — the step name is for logs, not users.
        BlickwerkError::StepFailed { source, .. } => humanize_error(source),

        BlickwerkError::ResourceUnavailable(path) => HumanError {
            message: "A file the app needs is missing.".into(),
            suggestion: format!(
                "Try reinstalling the app — that restores all bundled files. (Missing: {path})"
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BlickwerkError::ModelInvalid(detail) => HumanError {
            message: "The face-matching component couldn't start.".into(),
            suggestion: format!("Try reinstalling the app. ({detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        BlickwerkError::IntegrityMismatch { .. } => HumanError {
            message: "A file the app needs appears damaged.".into(),
            suggestion: "Try reinstalling the app to restore the original files.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BlickwerkError::Io(detail) => HumanError {
            message: "The app had trouble reading its files.".into(),
            suggestion: format!("Close the app and open it again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BlickwerkError::Serialization(_) => HumanError {
            message: "The app's settings couldn't be read.".into(),
            suggestion: "Your settings will be reset to defaults the next time the app starts."
                .into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BlickwerkError::Bridge(detail) => HumanError {
            message: "The app couldn't talk to your device.".into(),
            suggestion: format!("Close the app and open it again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },

        BlickwerkError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on this device.".into(),
            suggestion: "Face matching needs the mobile app on a phone or tablet.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
