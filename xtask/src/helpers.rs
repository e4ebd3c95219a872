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

use anyhow::{Context, Result};
use std::env;
use std::process::Command;
use std::time::{Duration, Instant};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";
pub const MAGNIFIER: &str = "🔍";
pub const SLIDERS: &str = "🎛";

pub const BANNER: &str = "Control Room workspace tasks: CI steps and bundled preset checks.";

pub fn print_task_start(task_name: &str, emoji: &str, color: &str) {
    println!("\n{BOLD}{color}{emoji} {task_name}{RESET}");
}

pub fn print_success(message: &str) {
    println!("{BOLD}{GREEN}{CHECK} {message}{RESET}");
}

pub fn print_error(message: &str) {
    println!("{BOLD}{RED}{CROSS} {message}{RESET}");
}

pub fn print_info(message: &str) {
    println!("{DIM}{message}{RESET}");
}

/// Runs cargo with `args` from the workspace root, honouring `$CARGO` when
/// xtask itself was started by cargo.
pub fn run_cargo(args: &[&str]) -> Result<Duration> {
    let cargo = env::var("CARGO").unwrap_or_else(|_| "cargo".to_string());
    print_info(&format!("$ cargo {}", args.join(" ")));

    let start = Instant::now();
    let status = Command::new(&cargo)
        .args(args)
        .status()
        .with_context(|| format!("Failed to spawn '{cargo}'"))?;
    if !status.success() {
        anyhow::bail!("cargo {} exited with {status}", args.join(" "));
    }
    Ok(start.elapsed())
}
