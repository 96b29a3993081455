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
//! Three-way reconciliation between a hot working tree, a cold backup
//! tree, and a persisted checksum index.

pub mod apply;
pub mod change;
pub mod check;
pub mod checksum;
pub mod diff;
pub mod error;
pub mod fsutil;
pub mod ignorefile;
pub mod index;
pub mod output;
pub mod postprocess;
pub mod progress;
pub mod prompt;
pub mod walk;
