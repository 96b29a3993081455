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
//! Colored terminal output helpers. No quiet/json modes — §6 gives `sync`
//! and `check` no flags to hang those off of.

use colored::Colorize;

pub fn banner(title: &str) {
    println!("{}", format!(" ▲ {title} ").black().on_cyan().bold());
    println!();
}

pub fn rule() {
    println!("{}", "─".repeat(60).dimmed());
}

pub fn info(line: &str) {
    println!("{line}");
}

pub fn warn(line: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), line);
}

pub fn fail(line: &str) {
    eprintln!("{} {}", "FAIL:".red().bold(), line);
}

pub fn ok(line: &str) {
    println!("{} {}", "OK:".green().bold(), line);
}
