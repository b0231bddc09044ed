// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blickwerk — Face-embedding model handle.
//
// Holds the bundled TFLite model blob in memory together with its fixed
// network parameters. Inference itself happens in the vision SDK; this crate
// only owns, validates, and fingerprints the bytes handed to it.

pub mod integrity;
pub mod model;

pub use integrity::{hash_bytes, verify_hash};
pub use model::FaceMatchModel;
