// Copyright 2025 eraflo
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

// Build automation and scripting tasks for the Control Room workspace
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::ci::{self, Step};
use commands::presets;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask", version, about = helpers::BANNER)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all crates in the workspace.
    Build,
    /// Run all tests in the workspace.
    Test,
    /// Run `cargo check` on all crates.
    Check,
    /// Format all code in the workspace.
    Format,
    /// Run clippy on all crates with warnings as errors.
    Clippy,
    /// Run the `control-room` binary against the sample scene.
    Demo,
    /// Run the CI pipeline: format check, check, clippy, tests, presets, demo.
    All,
    /// Bundled default presets.
    Presets {
        #[command(subcommand)]
        command: PresetsCommand,
    },
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// Check that every default preset parses and only stores known fields.
    Validate {
        /// Directory to check instead of the ones listed in `Presets.toml`.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// Print the default presets and their values.
    List {
        /// Directory to list instead of the ones listed in `Presets.toml`.
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Build => ci::run(Step::Build).map(drop),
        Commands::Test => ci::run(Step::Test).map(drop),
        Commands::Check => ci::run(Step::Check).map(drop),
        Commands::Format => ci::run(Step::Format).map(drop),
        Commands::Clippy => ci::run(Step::Clippy).map(drop),
        Commands::Demo => ci::run(Step::Demo).map(drop),
        Commands::All => ci::all(),
        Commands::Presets { command } => match command {
            PresetsCommand::Validate { dir } => presets::validate(dir),
            PresetsCommand::List { dir } => presets::list(dir),
        },
    }
}
