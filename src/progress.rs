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
//! Progress reporting as an explicit handle passed through the call graph
//! (not a global singleton — §5). A no-op implementation satisfies tests.

use indicatif::{ProgressBar, ProgressStyle};

pub trait Progress {
    /// Advance the bar by `n` bytes.
    fn inc(&self, n: u64);
    /// Replace the bar's trailing message.
    fn set_message(&self, msg: String);
    /// Mark the bar as finished, with a final message.
    fn finish(&self, msg: String);
}

/// Real terminal progress bar, used for the checksum/hashing passes.
pub struct BarProgress(ProgressBar);

impl BarProgress {
    pub fn new(total: u64, label: &str) -> Self {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template(&format!(
                "  {{spinner:.cyan}} {label:<10} [{{bar:40.cyan/blue}}] {{bytes}}/{{total_bytes}}  {{elapsed}}"
            ))
            .unwrap()
            .progress_chars("=> "),
        );
        Self(pb)
    }
}

impl Progress for BarProgress {
    fn inc(&self, n: u64) {
        self.0.inc(n);
    }
    fn set_message(&self, msg: String) {
        self.0.set_message(msg);
    }
    fn finish(&self, msg: String) {
        self.0.finish_with_message(msg);
    }
}

/// No-op handle, used by unit tests and anywhere progress is irrelevant.
pub struct NoopProgress;

impl Progress for NoopProgress {
    fn inc(&self, _n: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}
