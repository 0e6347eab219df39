// Copyright 2025 Fernando Borretti
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

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;

use crate::cmd::check::check_deck;
use crate::cmd::drill::drill;
use crate::cmd::export::export_deck;
use crate::cmd::orphans::list_orphans;
use crate::cmd::stats::print_deck_stats;
use crate::config::Config;
use crate::error::Fallible;
use crate::store::Backend;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding review records. Defaults to ~/.flashcards.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Storage backend. Overrides the data directory's config.toml.
    #[arg(long, global = true)]
    backend: Option<Backend>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Drill the cards in a Markdown table.
    Drill {
        /// Path to the card file.
        file: PathBuf,
    },
    /// Check that a card file parses.
    Check {
        /// Path to the card file.
        file: PathBuf,
    },
    /// Print review statistics as JSON.
    Stats {
        /// Path to the card file.
        file: PathBuf,
    },
    /// Export every card and its review record as JSON.
    Export {
        /// Path to the card file.
        file: PathBuf,
    },
    /// List stored fingerprints that no longer match a card.
    Orphans {
        /// Path to the card file.
        file: PathBuf,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Cli = Cli::parse();
    match cli.command {
        Command::Check { file } => check_deck(&file),
        command => {
            let config = Config::load(cli.data_dir, cli.backend)?;
            log::debug!(
                "Using {} store in {}",
                config.backend,
                config.data_dir.display()
            );
            match command {
                Command::Drill { file } => drill(&config, &file),
                Command::Stats { file } => print_deck_stats(&config, &file),
                Command::Export { file } => export_deck(&config, &file),
                Command::Orphans { file } => list_orphans(&config, &file),
                Command::Check { file } => check_deck(&file),
            }
        }
    }
}
