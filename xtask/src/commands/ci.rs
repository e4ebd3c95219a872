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

use crate::commands::presets;
use crate::helpers::*;
use anyhow::Result;
use std::time::{Duration, Instant};

/// Scratch preferences for the demo run, so CI never touches the user's file.
const DEMO_PREFS: &str = "target/xtask/control_room.json";

/// A single workspace task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Build,
    Test,
    Check,
    /// Rewrites sources with rustfmt.
    Format,
    /// Fails on unformatted sources without touching them.
    FormatCheck,
    Clippy,
    /// Validates the bundled default presets in-process.
    Presets,
    /// Drives the `control-room` binary against the sample scene.
    Demo,
}

impl Step {
    /// Steps of `cargo xtask all`, cheapest first.
    pub const PIPELINE: [Step; 6] = [
        Step::FormatCheck,
        Step::Check,
        Step::Clippy,
        Step::Test,
        Step::Presets,
        Step::Demo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Step::Build => "Build",
            Step::Test => "Tests",
            Step::Check => "Check",
            Step::Format => "Format",
            Step::FormatCheck => "Format check",
            Step::Clippy => "Clippy",
            Step::Presets => "Default presets",
            Step::Demo => "Control Room demo",
        }
    }

    /// Arguments handed to cargo, `None` for steps run inside xtask.
    pub fn cargo_args(self) -> Option<&'static [&'static str]> {
        let args: &'static [&'static str] = match self {
            Step::Build => &["build", "--workspace"],
            Step::Test => &["test", "--workspace"],
            Step::Check => &["check", "--workspace", "--all-targets"],
            // `fmt` takes `--all`, not `--workspace`.
            Step::Format => &["fmt", "--all"],
            Step::FormatCheck => &["fmt", "--all", "--", "--check"],
            Step::Clippy => &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            Step::Presets => return None,
            Step::Demo => &[
                "run",
                "--quiet",
                "--package",
                "control-room-editor",
                "--bin",
                "control-room",
                "--",
                "--defaults",
                "presets/defaults",
                "--prefs",
                DEMO_PREFS,
            ],
        };
        Some(args)
    }
}

/// Runs one step and reports how it went.
pub fn run(step: Step) -> Result<Duration> {
    print_task_start(step.label(), SLIDERS, CYAN);
    let elapsed = match step.cargo_args() {
        Some(args) => run_cargo(args)?,
        None => {
            let start = Instant::now();
            presets::validate(None)?;
            start.elapsed()
        }
    };
    print_success(&format!("{} done in {:.2}s", step.label(), elapsed.as_secs_f64()));
    Ok(elapsed)
}

/// Result of one pipeline step.
#[derive(Debug)]
pub struct Outcome {
    pub step: Step,
    pub elapsed: Duration,
    pub error: Option<String>,
}

/// Collected outcomes of a pipeline run.
#[derive(Debug, Default)]
pub struct Report {
    outcomes: Vec<Outcome>,
}

impl Report {
    pub fn record(&mut self, step: Step, elapsed: Duration, result: Result<Duration>) {
        let (elapsed, error) = match result {
            Ok(step_time) => (step_time, None),
            Err(e) => (elapsed, Some(format!("{e:#}"))),
        };
        self.outcomes.push(Outcome {
            step,
            elapsed,
            error,
        });
    }

    pub fn failed(&self) -> Vec<&Outcome> {
        self.outcomes.iter().filter(|o| o.error.is_some()).collect()
    }

    pub fn total(&self) -> Duration {
        self.outcomes.iter().map(|o| o.elapsed).sum()
    }

    fn print(&self) {
        println!("\n{BOLD}Pipeline summary{RESET}");
        for outcome in &self.outcomes {
            let (color, mark) = match outcome.error {
                None => (GREEN, CHECK),
                Some(_) => (RED, CROSS),
            };
            println!(
                "  {color}{mark}{RESET} {:<20} {:>7.2}s",
                outcome.step.label(),
                outcome.elapsed.as_secs_f64()
            );
            if let Some(error) = &outcome.error {
                println!("      {YELLOW}{error}{RESET}");
            }
        }
        println!("  {:<22} {:>7.2}s", "total", self.total().as_secs_f64());
    }
}

/// Runs every pipeline step, even after a failure, then fails if any did.
pub fn all() -> Result<()> {
    println!("{BOLD}{BANNER}{RESET}");
    let mut report = Report::default();
    for step in Step::PIPELINE {
        let start = Instant::now();
        let result = run(step);
        if let Err(e) = &result {
            print_error(&format!("{}: {e:#}", step.label()));
        }
        report.record(step, start.elapsed(), result);
    }
    report.print();

    let failed = report.failed();
    if !failed.is_empty() {
        let names: Vec<_> = failed.iter().map(|o| o.step.label()).collect();
        anyhow::bail!("{} of {} steps failed: {}", failed.len(), Step::PIPELINE.len(), names.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_never_rewrites_sources() {
        assert!(!Step::PIPELINE.contains(&Step::Format));
        assert!(Step::PIPELINE.contains(&Step::FormatCheck));
        assert_eq!(Step::PIPELINE.last(), Some(&Step::Demo));
    }

    #[test]
    fn demo_keeps_preferences_out_of_the_user_config() {
        let args = Step::Demo.cargo_args().unwrap();
        let prefs = args.iter().position(|a| *a == "--prefs").unwrap();
        assert_eq!(args[prefs + 1], DEMO_PREFS);
        assert!(args.contains(&"control-room"));
    }

    #[test]
    fn presets_step_runs_in_process() {
        assert!(Step::Presets.cargo_args().is_none());
    }

    #[test]
    fn report_lists_failures_and_sums_time() {
        let mut report = Report::default();
        report.record(Step::Check, Duration::from_secs(9), Ok(Duration::from_secs(2)));
        report.record(
            Step::Presets,
            Duration::from_secs(1),
            Err(anyhow::anyhow!("unknown field sampling/foo")),
        );

        let failed = report.failed();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].step, Step::Presets);
        assert!(failed[0].error.as_deref().unwrap().contains("sampling/foo"));
        assert_eq!(report.total(), Duration::from_secs(3));
    }
}
