// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
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

//! Users API End-to-End Runner
//!
//! Runs the built-in `users` scenarios against a live API.
//!
//! # Usage
//!
//! ```text
//! users-e2e [OPTIONS] <COMMAND>
//!
//! Commands:
//!   list  List the built-in scenarios
//!   run   Run scenarios (all of them by default)
//!
//! Options:
//!       --api-url <URL>    Override API_URL
//!       --timeout <SECS>   Per-request timeout (default: none)
//!   -v, --verbose          Enable verbose output
//!   -q, --quiet            Suppress non-error output
//!   -h, --help             Print help
//!   -V, --version          Print version
//! ```
//!
//! The bearer credential is always read from `BEARER_TOKEN`.
//!
//! # Exit status
//!
//! `0` when every scenario passed, `1` when one failed, `2` on a
//! configuration error.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use gorest_users_client::{suites, ApiClientConfig, Scenario, ScenarioRunner, API_URL_VAR};

/// Users API End-to-End Runner
#[derive(Parser)]
#[command(name = "users-e2e")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "End-to-end scenarios for the GoRest users API", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Override the API base address from API_URL
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in scenarios
    List,

    /// Run scenarios
    Run {
        /// Scenario names (default: all)
        #[arg(value_name = "SCENARIO")]
        scenarios: Vec<String>,

        /// Stop after the first failing scenario
        #[arg(long)]
        fail_fast: bool,
    },
}

/// Exit status for configuration errors.
const EXIT_CONFIG: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        tracing::Level::WARN
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    match &cli.command {
        Commands::List => {
            for name in suites::NAMES {
                println!("{}", name);
            }
            ExitCode::SUCCESS
        }
        Commands::Run {
            scenarios,
            fail_fast,
        } => {
            let scenarios = match select_scenarios(scenarios) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(EXIT_CONFIG);
                }
            };

            let config = match load_config(&cli) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    return ExitCode::from(EXIT_CONFIG);
                }
            };

            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create async runtime: {}", e);
                    return ExitCode::FAILURE;
                }
            };

            runtime.block_on(run_scenarios(config, scenarios, *fail_fast, cli.quiet))
        }
    }
}

/// Build the configuration from the environment and command-line overrides.
fn load_config(cli: &Cli) -> gorest_users_client::Result<ApiClientConfig> {
    let mut config = ApiClientConfig::from_lookup(|name| match (&cli.api_url, name) {
        (Some(url), API_URL_VAR) => Some(url.clone()),
        _ => std::env::var(name).ok(),
    })?;

    if let Some(secs) = cli.timeout {
        config.timeout = Some(Duration::from_secs(secs));
    }

    Ok(config)
}

/// Resolve scenario names; an empty list selects every scenario.
fn select_scenarios(names: &[String]) -> Result<Vec<Scenario>, String> {
    if names.is_empty() {
        return Ok(suites::all());
    }

    names
        .iter()
        .map(|name| {
            suites::by_name(name).ok_or_else(|| {
                format!(
                    "unknown scenario '{}' (expected one of: {})",
                    name,
                    suites::NAMES.join(", ")
                )
            })
        })
        .collect()
}

async fn run_scenarios(
    config: ApiClientConfig,
    scenarios: Vec<Scenario>,
    fail_fast: bool,
    quiet: bool,
) -> ExitCode {
    let runner = match ScenarioRunner::new(config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };

    let mut passed = 0;
    let mut failed = 0;

    for scenario in &scenarios {
        let report = runner.run(scenario).await;

        if report.passed() {
            passed += 1;
            if !quiet {
                print!("{}", report);
            }
        } else {
            failed += 1;
            eprint!("{}", report);
            if fail_fast {
                break;
            }
        }
    }

    if !quiet {
        println!();
        println!("{} passed, {} failed", passed, failed);
    }

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
