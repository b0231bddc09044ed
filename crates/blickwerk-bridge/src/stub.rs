// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where native mobile APIs are unavailable.
//
// There is no resource bundle on desktop, so resource paths resolve against
// an on-disk assets directory instead: an explicit override, or
// `$XDG_DATA_HOME/blickwerk/assets` falling back to
// `~/.local/share/blickwerk/assets`. Platform setup is a no-op — there are
// no notification channels to register.

use std::path::PathBuf;

use blickwerk_core::error::{BlickwerkError, Result};

use crate::traits::{NativeResources, PlatformBridge, PlatformSetup};

/// Filesystem-backed bridge used on non-mobile platforms.
pub struct StubBridge {
    assets_dir: PathBuf,
}

impl StubBridge {
    /// Create a stub bridge reading resources below `assets_dir`, or below
    /// the default assets directory when `None`.
    pub fn new(assets_dir: Option<PathBuf>) -> Self {
        let assets_dir = assets_dir.unwrap_or_else(default_assets_dir);
        tracing::debug!(path = %assets_dir.display(), "stub bridge assets directory");
        Self { assets_dir }
    }

    /// Directory this bridge resolves resource paths against.
    pub fn assets_dir(&self) -> &PathBuf {
        &self.assets_dir
    }
}

fn default_assets_dir() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join("blickwerk").join("assets");
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("blickwerk")
            .join("assets");
    }
    // Last resort — current directory.
    PathBuf::from("assets")
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl PlatformSetup for StubBridge {
    fn platform_init(&self) -> Result<()> {
        // No notification channels or system services on desktop.
        tracing::debug!("platform_init: nothing to do on the stub bridge");
        Ok(())
    }
}

impl NativeResources for StubBridge {
    fn read_resource(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.assets_dir.join(path);
        match std::fs::read(&full) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlickwerkError::ResourceUnavailable(path.to_owned()))
            }
            Err(e) => Err(BlickwerkError::Io(e)),
        }
    }
}
