// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blickwerk — Native platform bridge abstractions.
//
// This crate defines the traits and platform dispatch logic for the native
// SDK bridge. It lets the bootstrap core perform platform setup and read
// bundled resources through a unified interface, with concrete backends for
// iOS (Core Foundation) and Android (ART/JNI) and a filesystem-backed stub
// for desktop/CI builds.

use std::path::PathBuf;

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod stub;

/// Construct the bridge implementation for the target operating system.
///
/// `assets_override` replaces the stub bridge's default assets directory and
/// is only meaningful on desktop builds; mobile bundles are fixed at package
/// time.
///
/// RETURNS: A boxed trait object (`dyn PlatformBridge`) that abstracts away
/// the underlying native SDK details.
pub fn platform_bridge(assets_override: Option<PathBuf>) -> Box<dyn traits::PlatformBridge> {
    #[cfg(target_os = "ios")]
    {
        // iOS: resources come from the main NSBundle.
        let _ = assets_override;
        Box::new(ios::IosBridge::new())
    }
    #[cfg(target_os = "android")]
    {
        // Android: resources come from the APK's AssetManager via JNI.
        let _ = assets_override;
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // DESKTOP/CI: resources are plain files under an assets directory.
        Box::new(stub::StubBridge::new(assets_override))
    }
}
