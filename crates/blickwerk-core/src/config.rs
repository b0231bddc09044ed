// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Resource path of the bundled face-embedding model.
pub const FACE_MATCH_MODEL_RESOURCE: &str = "files/facenet_512.tflite";

/// Side length in pixels of the square crop the face-match model consumes.
pub const FACE_MATCH_IMAGE_SIZE: u32 = 160;

/// Length of the embedding vector the face-match model produces.
pub const FACE_MATCH_EMBEDDING_LEN: usize = 512;

/// Persistent application settings.
///
/// The model parameters are applied uniformly on every platform; they describe
/// the bundled network, not a per-device preference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Resource path of the face-embedding model blob.
    pub model_resource: String,
    /// Square input size (pixels) expected by the model.
    pub model_image_size: u32,
    /// Embedding vector length produced by the model.
    pub model_embedding_len: usize,
    /// Optional pinned SHA-256 (lowercase hex) of the model blob.
    /// When set, a mismatching blob fails the model step.
    pub model_digest: Option<String>,
    /// Override for the assets directory on desktop builds.
    pub assets_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_resource: FACE_MATCH_MODEL_RESOURCE.to_owned(),
            model_image_size: FACE_MATCH_IMAGE_SIZE,
            model_embedding_len: FACE_MATCH_EMBEDDING_LEN,
            model_digest: None,
            assets_dir: None,
        }
    }
}
