// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory handle for the bundled face-embedding model.

use blickwerk_core::error::{BlickwerkError, Result};
use tracing::info;

use crate::integrity::{hash_bytes, verify_hash};

/// TFLite flatbuffer file identifier.
const TFLITE_MAGIC: &[u8; 4] = b"TFL3";
/// Byte offset of the flatbuffer file identifier.
const TFLITE_MAGIC_OFFSET: usize = 4;

/// Immutable wrapper around the face-embedding model blob.
///
/// Constructed once during application bootstrap and shared read-only with
/// the vision SDK thereafter. The two network parameters are properties of
/// the bundled model file and are applied uniformly on every platform.
pub struct FaceMatchModel {
    data: Vec<u8>,
    image_square_size: u32,
    embedding_len: usize,
    digest: String,
}

impl FaceMatchModel {
    /// Wrap `data` as a face-match model.
    ///
    /// Validates that the blob looks like a TFLite flatbuffer (non-empty,
    /// long enough to carry a header, `TFL3` identifier at offset 4) and
    /// fingerprints it with SHA-256.
    ///
    /// # Errors
    ///
    /// Returns [`BlickwerkError::ModelInvalid`] for empty, truncated, or
    /// malformed blobs and for zero network parameters.
    pub fn new(data: Vec<u8>, image_square_size: u32, embedding_len: usize) -> Result<Self> {
        if data.is_empty() {
            return Err(BlickwerkError::ModelInvalid("model blob is empty".into()));
        }
        if data.len() < TFLITE_MAGIC_OFFSET + TFLITE_MAGIC.len() {
            return Err(BlickwerkError::ModelInvalid(format!(
                "model blob truncated at {} bytes",
                data.len()
            )));
        }
        if &data[TFLITE_MAGIC_OFFSET..TFLITE_MAGIC_OFFSET + TFLITE_MAGIC.len()] != TFLITE_MAGIC {
            return Err(BlickwerkError::ModelInvalid(
                "missing TFL3 flatbuffer identifier".into(),
            ));
        }
        if image_square_size == 0 {
            return Err(BlickwerkError::ModelInvalid(
                "image square size must be non-zero".into(),
            ));
        }
        if embedding_len == 0 {
            return Err(BlickwerkError::ModelInvalid(
                "embedding length must be non-zero".into(),
            ));
        }

        let digest = hash_bytes(&data);
        info!(
            len = data.len(),
            digest = %digest,
            image_square_size,
            embedding_len,
            "face-match model loaded"
        );

        Ok(Self {
            data,
            image_square_size,
            embedding_len,
            digest,
        })
    }

    /// Like [`new`](Self::new), but first verifies `data` against a pinned
    /// SHA-256 digest.
    ///
    /// # Errors
    ///
    /// Returns [`BlickwerkError::IntegrityMismatch`] when the blob does not
    /// hash to `expected_hex`, otherwise validates as [`new`](Self::new).
    pub fn with_pinned_digest(
        data: Vec<u8>,
        image_square_size: u32,
        embedding_len: usize,
        expected_hex: &str,
    ) -> Result<Self> {
        verify_hash(&data, expected_hex)?;
        Self::new(data, image_square_size, embedding_len)
    }

    /// Raw model bytes, as handed to the vision SDK.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Size of the model blob in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the blob is empty (never true for a constructed model).
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Square input size (pixels) expected by the network.
    pub fn image_square_size(&self) -> u32 {
        self.image_square_size
    }

    /// Length of the embedding vector the network produces.
    pub fn embedding_len(&self) -> usize {
        self.embedding_len
    }

    /// SHA-256 fingerprint of the blob (lowercase hex).
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

// Hand-written so logs never carry megabytes of model bytes.
impl std::fmt::Debug for FaceMatchModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaceMatchModel")
            .field("len", &self.data.len())
            .field("digest", &self.digest)
            .field("image_square_size", &self.image_square_size)
            .field("embedding_len", &self.embedding_len)
            .finish()
    }
}
