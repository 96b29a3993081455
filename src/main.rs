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
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use dintact::{apply, check};
use std::path::PathBuf;

/// dintact — three-way reconciliation between a hot working tree, a cold
/// backup tree, and a persisted checksum index.
#[derive(Parser)]
#[command(
    name = "dintact",
    version = env!("CARGO_PKG_VERSION"),
    author = "Ankit Chaubey <ankitchaubey.dev@gmail.com>",
    about = "Three-way reconciliation between a hot tree, a cold tree, and a checksum index",
    after_help = concat!(
        "EXAMPLES:\n",
        "  dintact check ./backup\n",
        "  dintact sync ./photos ./backup\n"
    )
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify every indexed path against its recorded checksum
    Check {
        #[arg(value_name = "COLD_DIR")]
        cold_dir: PathBuf,
    },

    /// Reconcile the hot tree, the cold tree, and the index
    Sync {
        #[arg(value_name = "HOT_DIR")]
        hot_dir: PathBuf,
        #[arg(value_name = "COLD_DIR")]
        cold_dir: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".red().bold(), e);
        for cause in e.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".yellow(), cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { cold_dir } => {
            let intact = check::check(&cold_dir)?;
            if !intact {
                std::process::exit(1);
            }
        }
        Commands::Sync { hot_dir, cold_dir } => {
            apply::sync(&hot_dir, &cold_dir)?;
        }
    }

    Ok(())
}
