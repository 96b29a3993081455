// ─────────────────────────────────────────────────────────────────────────────
// dintact v0.1.0
// Copyright 2026 Ankit Chaubey <ankitchaubey.dev@gmail.com>
// github.com/ankit-chaubey
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// All rights reserved 2026.
// ─────────────────────────────────────────────────────────────────────────────
//! Closed set of fatal error kinds (§7 of the design). IO warnings during
//! hashing are not represented here — they are printed and the hash
//! continues with whatever bytes were read.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DintactError {
    #[error("index at {path} is missing the '# dintact index ' header")]
    IndexHeaderMissing { path: PathBuf },

    #[error("index at {path} is incompatible: {reason}")]
    IndexIncompatible { path: PathBuf, reason: String },

    #[error("'{path}' is a file on one side and a directory on the other")]
    NameCollision { path: PathBuf },

    #[error("{which} root does not exist or is not a directory: {path}")]
    RootMissing { which: &'static str, path: PathBuf },

    #[error("failed to apply change for '{path}': {reason}")]
    ApplyFailure { path: PathBuf, reason: String },

    #[error("aborted: user declined to commence the batch")]
    UserAbort,
}
