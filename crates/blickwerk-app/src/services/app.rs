// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide application context.
//
// Owns the configuration, the platform bridge, the bootstrap coordinator,
// and the face-match model slot. Entry points (UI launch, deep links,
// lifecycle re-entry) all go through `App::global()` and then
// `ensure_initialized()`; the coordinator guarantees the expensive setup
// work runs exactly once no matter how many of them race.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use tracing::info;

use blickwerk_bootstrap::{Bootstrap, InitStep, StartupReport};
use blickwerk_bridge::traits::PlatformBridge;
use blickwerk_core::error::Result;
use blickwerk_core::{AppConfig, Platform, Readiness};
use blickwerk_facematch::FaceMatchModel;

/// Name of the platform setup step.
const STEP_PLATFORM: &str = "platform";
/// Name of the model-loading step.
const STEP_MODEL: &str = "facematch-model";

static GLOBAL: OnceLock<App> = OnceLock::new();

/// Application context shared by every entry point for the lifetime of the
/// process.
///
/// All expensive state (the multi-megabyte model blob, platform-side setup)
/// is created by the bootstrap coordinator's one successful pass; until then
/// the context is cheap to construct and safe to hand around.
pub struct App {
    config: AppConfig,
    bridge: Arc<dyn PlatformBridge>,
    bootstrap: Bootstrap,
    model: Arc<OnceLock<Arc<FaceMatchModel>>>,
    data_dir: PathBuf,
}

impl App {
    /// The process-wide instance, constructed on first access.
    ///
    /// `OnceLock::get_or_init` makes concurrent first access safe: exactly
    /// one caller builds the context, the rest block briefly and share it.
    pub fn global() -> &'static App {
        GLOBAL.get_or_init(|| {
            let dir = super::data_dir::data_dir();
            let config = load_config(&dir).unwrap_or_default();
            let bridge: Arc<dyn PlatformBridge> =
                Arc::from(blickwerk_bridge::platform_bridge(config.assets_dir.clone()));
            App::new(config, bridge, dir)
        })
    }

    /// Build a context from explicit parts.
    ///
    /// `global()` calls this with the persisted config and the real bridge;
    /// tests call it directly with a temp directory and a stub bridge.
    pub fn new(config: AppConfig, bridge: Arc<dyn PlatformBridge>, data_dir: PathBuf) -> Self {
        let model = Arc::new(OnceLock::new());
        let steps = wire_steps(&config, &bridge, &model);
        info!(
            os = %Platform::current(),
            bridge = bridge.platform_name(),
            data_dir = %data_dir.display(),
            "app context created"
        );
        Self {
            config,
            bridge,
            bootstrap: Bootstrap::new(steps),
            model,
            data_dir,
        }
    }

    /// Run the initialisation steps if no pass has succeeded yet.
    ///
    /// Delegates to the bootstrap coordinator; see [`Bootstrap::ensure_initialized`]
    /// for the single-flight and retry contract.
    pub async fn ensure_initialized(&self) -> Result<()> {
        self.bootstrap.ensure_initialized().await
    }

    /// Whether the one successful initialisation pass has completed.
    pub fn is_initialized(&self) -> bool {
        self.bootstrap.is_initialized()
    }

    /// Current bootstrap lifecycle state, for loading screens.
    pub fn readiness(&self) -> Readiness {
        self.bootstrap.readiness()
    }

    /// The loaded face-match model, or `None` until initialisation succeeds.
    ///
    /// Gated on the readiness flag rather than the slot itself, so callers
    /// only ever see the model the way a completed pass published it.
    pub fn face_match_model(&self) -> Option<Arc<FaceMatchModel>> {
        if !self.is_initialized() {
            return None;
        }
        self.model.get().cloned()
    }

    /// Timing report of the successful pass, or `None` before one exists.
    pub fn startup_report(&self) -> Option<&StartupReport> {
        self.bootstrap.report()
    }

    /// Human-readable name of the platform bridge backing this context.
    pub fn platform_name(&self) -> &str {
        self.bridge.platform_name()
    }

    /// The active configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Write the active configuration to `config.json` in the data dir.
    pub fn persist_config(&self) -> Result<()> {
        persist_config(&self.data_dir, &self.config)
    }

    /// Write the startup report to `last_boot.json` in the data dir, so
    /// diagnostics can show what the previous launch cost.
    pub fn persist_last_boot(&self, report: &StartupReport) -> Result<()> {
        let path = self.data_dir.join(LAST_BOOT_FILE);
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(&path, json)?;
        Ok(())
    }
}

/// Build the ordered step list: platform setup first, then the model load.
///
/// The closures clone their captured handles per invocation because a failed
/// pass re-runs every step from the start.
fn wire_steps(
    config: &AppConfig,
    bridge: &Arc<dyn PlatformBridge>,
    model_slot: &Arc<OnceLock<Arc<FaceMatchModel>>>,
) -> Vec<InitStep> {
    let platform = {
        let bridge = Arc::clone(bridge);
        InitStep::new(STEP_PLATFORM, move || {
            let bridge = Arc::clone(&bridge);
            async move { bridge.platform_init() }
        })
    };

    let model = {
        let bridge = Arc::clone(bridge);
        let slot = Arc::clone(model_slot);
        let resource = config.model_resource.clone();
        let image_size = config.model_image_size;
        let embedding_len = config.model_embedding_len;
        let pinned_digest = config.model_digest.clone();
        InitStep::new(STEP_MODEL, move || {
            let bridge = Arc::clone(&bridge);
            let slot = Arc::clone(&slot);
            let resource = resource.clone();
            let pinned_digest = pinned_digest.clone();
            async move {
                let bytes = bridge.read_resource(&resource)?;
                let model = match &pinned_digest {
                    Some(expected) => FaceMatchModel::with_pinned_digest(
                        bytes,
                        image_size,
                        embedding_len,
                        expected,
                    )?,
                    None => FaceMatchModel::new(bytes, image_size, embedding_len)?,
                };
                // First publication wins; a retry pass re-creates the same
                // model from the same bytes.
                let _ = slot.set(Arc::new(model));
                Ok(())
            }
        })
    };

    vec![platform, model]
}

// -- Config file persistence -------------------------------------------------

const CONFIG_FILE: &str = "config.json";
const LAST_BOOT_FILE: &str = "last_boot.json";

pub fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    serde_json::from_str(&data).ok()
}

pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
