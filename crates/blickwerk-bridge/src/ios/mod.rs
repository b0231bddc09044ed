// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS platform bridge via objc2.
//
// Requires compilation with the iOS SDK (Xcode). There is no platform-side
// setup to perform on iOS; resource reads resolve against the main
// `NSBundle`'s resource path and then go through ordinary file I/O.

#![cfg(target_os = "ios")]

use std::path::PathBuf;

use objc2_foundation::NSBundle;

use blickwerk_core::error::{BlickwerkError, Result};

use crate::traits::{NativeResources, PlatformBridge, PlatformSetup};

/// Bridge backed by Foundation.
pub struct IosBridge;

impl IosBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the main bundle's resource directory.
fn bundle_resource_dir() -> Result<PathBuf> {
    let bundle = NSBundle::mainBundle();
    let path = bundle
        .resourcePath()
        .ok_or_else(|| BlickwerkError::Bridge("main bundle has no resource path".into()))?;
    Ok(PathBuf::from(path.to_string()))
}

impl PlatformBridge for IosBridge {
    fn platform_name(&self) -> &str {
        "iOS"
    }
}

impl PlatformSetup for IosBridge {
    fn platform_init(&self) -> Result<()> {
        // Nothing to do — notification permissions are requested lazily by
        // the flows that need them.
        Ok(())
    }
}

impl NativeResources for IosBridge {
    fn read_resource(&self, path: &str) -> Result<Vec<u8>> {
        let full = bundle_resource_dir()?.join(path);
        match std::fs::read(&full) {
            Ok(bytes) => {
                tracing::debug!(path, len = bytes.len(), "bundle resource read");
                Ok(bytes)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlickwerkError::ResourceUnavailable(path.to_owned()))
            }
            Err(e) => Err(BlickwerkError::Io(e)),
        }
    }
}
