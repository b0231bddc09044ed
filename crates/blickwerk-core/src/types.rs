// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blickwerk identity-check companion.

use serde::{Deserialize, Serialize};

/// Platforms the app ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    Android,
    Ios,
    /// Desktop / CI builds running against the stub bridge.
    Desktop,
}

impl Platform {
    /// Human-readable platform name for logs and the about screen.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::Desktop => "Desktop",
        }
    }

    /// The platform this binary was compiled for.
    pub fn current() -> Self {
        #[cfg(target_os = "android")]
        {
            Self::Android
        }
        #[cfg(target_os = "ios")]
        {
            Self::Ios
        }
        #[cfg(not(any(target_os = "android", target_os = "ios")))]
        {
            Self::Desktop
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Lifecycle of the application bootstrap, as observed by callers.
///
/// `Initializing` rolls back to `Uninitialized` when a pass fails; `Ready`
/// is terminal for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Readiness {
    /// No successful pass yet and none in flight.
    Uninitialized,
    /// A pass is currently running.
    Initializing,
    /// All initialisation steps completed successfully.
    Ready,
}

impl Readiness {
    /// Whether presentation code can proceed past its loading state.
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}
