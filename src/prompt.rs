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
//! Interactive yes/no confirmation, default No (§4.H steps 7-8).

use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, Write};

/// Ask `question [y/N]`. Anything other than a line starting with `y`/`Y`
/// is treated as No, including a bare Enter.
pub fn confirm(question: &str) -> Result<bool> {
    print!("  {} {} ", question, "[y/N]:".dimmed());
    io::stdout().flush().context("flushing stdout before prompt")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("reading confirmation from stdin")?;

    Ok(matches!(input.trim().chars().next(), Some('y') | Some('Y')))
}
