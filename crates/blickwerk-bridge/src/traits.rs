// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for native capabilities.
//
// The bootstrap coordinator drives these at startup: `PlatformSetup` is the
// one-shot platform configuration hook and `NativeResources` hands out the
// bundled model bytes. Everything else the app does with the device (camera,
// barcode scanning) lives behind the opaque vision SDK and never crosses
// this seam.

use blickwerk_core::error::Result;

/// Unified bridge that groups the native capabilities the core needs.
///
/// Implementations are shared across async tasks for the lifetime of the
/// process, hence the `Send + Sync` bound.
pub trait PlatformBridge: PlatformSetup + NativeResources + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "iOS").
    fn platform_name(&self) -> &str;
}

/// Platform-level setup performed during application bootstrap.
pub trait PlatformSetup {
    /// Apply platform-side settings (notification channel, status icons).
    ///
    /// Must be safe to call again: a failed bootstrap pass re-runs the whole
    /// step sequence, including this hook.
    fn platform_init(&self) -> Result<()>;
}

/// Read-only access to resources bundled with the application.
pub trait NativeResources {
    /// Return the raw bytes of the bundled resource at `path`
    /// (e.g. `files/facenet_512.tflite`).
    ///
    /// # Errors
    ///
    /// Returns [`BlickwerkError::ResourceUnavailable`] when no resource
    /// exists at `path`, or [`BlickwerkError::Io`] / [`BlickwerkError::Bridge`]
    /// when the platform fails to read it.
    ///
    /// [`BlickwerkError::ResourceUnavailable`]: blickwerk_core::BlickwerkError::ResourceUnavailable
    /// [`BlickwerkError::Io`]: blickwerk_core::BlickwerkError::Io
    /// [`BlickwerkError::Bridge`]: blickwerk_core::BlickwerkError::Bridge
    fn read_resource(&self, path: &str) -> Result<Vec<u8>>;
}
