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

//! Scenario runner.
//!
//! A [`Scenario`] is an ordered list of [`Step`]s followed by teardown steps.
//! Each step issues one request through the authenticated client, awaits the
//! response, captures fields into variables, then checks its
//! [`Expectation`]: status code first, body shape second.
//!
//! - The first failing step fails the scenario; later steps are skipped.
//! - Teardown steps always run. One whose path references a variable that
//!   was never captured is skipped.
//! - Nothing is retried.
//!
//! # Example
//!
//! ```no_run
//! use gorest_users_client::scenario::{Expectation, Scenario, ScenarioRunner, Step};
//! use gorest_users_client::ApiClientConfig;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scenario = Scenario::new("create_and_fetch")
//!     .step(
//!         Step::post("create", "/users", json!({
//!             "name": "Test User",
//!             "email": "testuser1@example.com",
//!             "gender": "male",
//!             "status": "active"
//!         }))
//!         .capture("id", "user_id")
//!         .expect(Expectation::status(201).has_field("id")),
//!     )
//!     .step(
//!         Step::get("fetch", "/users/{user_id}")
//!             .expect(Expectation::status(200).field_eq_var("id", "user_id")),
//!     )
//!     .teardown(Step::delete("delete", "/users/{user_id}"));
//!
//! let runner = ScenarioRunner::new(ApiClientConfig::from_env()?)?;
//! let report = runner.run(&scenario).await;
//! assert!(report.passed(), "{}", report);
//! # Ok(())
//! # }
//! ```

mod context;
mod expect;

pub use context::ScenarioContext;
pub use expect::{BodyCheck, Expectation};

use serde_json::Value;
use thiserror::Error;

use crate::client::ApiClient;
use crate::config::ApiClientConfig;
use crate::error::{ApiError, Result};
use crate::types::Method;

/// Why a step did not pass.
#[derive(Debug, Error)]
pub enum StepFailure {
    /// The request did not resolve to a response.
    #[error("request failed: {0}")]
    Transport(#[from] ApiError),

    /// The status code is not one of the accepted ones.
    #[error("expected status {}, got {actual}: {body}", join_statuses(.expected))]
    Status {
        /// Accepted status codes.
        expected: Vec<u16>,
        /// Observed status code.
        actual: u16,
        /// Observed body.
        body: Value,
    },

    /// The body does not have the expected shape or content.
    #[error("unexpected body: {0}")]
    Shape(String),

    /// The path references a variable no earlier step captured.
    #[error("undefined variable '{0}'")]
    MissingVariable(String),
}

fn join_statuses(statuses: &[u16]) -> String {
    statuses
        .iter()
        .map(u16::to_string)
        .collect::<Vec<_>>()
        .join(" or ")
}

/// One request of a scenario.
#[derive(Debug, Clone)]
pub struct Step {
    name: String,
    method: Method,
    path: String,
    body: Option<Value>,
    expectation: Expectation,
    captures: Vec<(String, String)>,
}

impl Step {
    /// Create a step. `path` may reference captured variables as `{name}`.
    ///
    /// The default expectation accepts any response.
    pub fn new(name: impl Into<String>, method: Method, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            body: None,
            expectation: Expectation::any(),
            captures: Vec::new(),
        }
    }

    /// A `GET` step.
    pub fn get(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Get, path)
    }

    /// A `POST` step with a JSON body.
    pub fn post(name: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self::new(name, Method::Post, path).body(body)
    }

    /// A `PUT` step with a JSON body.
    pub fn put(name: impl Into<String>, path: impl Into<String>, body: Value) -> Self {
        Self::new(name, Method::Put, path).body(body)
    }

    /// A `DELETE` step.
    pub fn delete(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(name, Method::Delete, path)
    }

    /// Set the JSON request body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the expectation checked against the response.
    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectation = expectation;
        self
    }

    /// Store the response body's `field` into variable `var`.
    ///
    /// Applied to every response carrying the field, before the
    /// expectation is checked, so teardown can clean up resources created
    /// by a step that otherwise failed.
    pub fn capture(mut self, field: impl Into<String>, var: impl Into<String>) -> Self {
        self.captures.push((field.into(), var.into()));
        self
    }

    /// Step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// HTTP verb.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path template.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request body, if any.
    pub fn request_body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Expectation on the response.
    pub fn expectation(&self) -> &Expectation {
        &self.expectation
    }

    async fn run(&self, client: &ApiClient, ctx: &mut ScenarioContext) -> StepOutcome {
        let path = match ctx.render(&self.path) {
            Ok(path) => path,
            Err(failure) => {
                return StepOutcome::new(self, self.path.clone(), None, StepResult::Failed(failure));
            }
        };

        let response = match client.request(self.method, &path, self.body.as_ref()).await {
            Ok(response) => response,
            Err(e) => return StepOutcome::new(self, path, None, StepResult::Failed(e.into())),
        };

        for (field, var) in &self.captures {
            if let Some(value) = response.field(field) {
                ctx.set(var.clone(), value.clone());
            }
        }

        let result = match self.expectation.verify(&response, ctx) {
            Ok(()) => StepResult::Passed,
            Err(failure) => StepResult::Failed(failure),
        };

        StepOutcome::new(self, path, Some(response.status()), result)
    }
}

/// Result of a single step.
#[derive(Debug)]
pub enum StepResult {
    /// The response met the expectation.
    Passed,
    /// The step failed.
    Failed(StepFailure),
    /// The step did not run.
    Skipped,
}

/// What happened when a step ran (or did not).
#[derive(Debug)]
pub struct StepOutcome {
    /// Step name.
    pub name: String,
    /// HTTP verb.
    pub method: Method,
    /// Rendered path, or the template if rendering failed or the step was skipped.
    pub path: String,
    /// Observed status code, if a response arrived.
    pub status: Option<u16>,
    /// Verdict.
    pub result: StepResult,
}

impl StepOutcome {
    fn new(step: &Step, path: String, status: Option<u16>, result: StepResult) -> Self {
        Self {
            name: step.name.clone(),
            method: step.method,
            path,
            status,
            result,
        }
    }

    fn skipped(step: &Step) -> Self {
        Self::new(step, step.path.clone(), None, StepResult::Skipped)
    }

    /// Returns true if the step passed.
    pub fn passed(&self) -> bool {
        matches!(self.result, StepResult::Passed)
    }

    /// Returns true if the step was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self.result, StepResult::Skipped)
    }

    /// The failure, if the step failed.
    pub fn failure(&self) -> Option<&StepFailure> {
        match &self.result {
            StepResult::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl std::fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = match self.result {
            StepResult::Passed => "ok  ",
            StepResult::Failed(_) => "FAIL",
            StepResult::Skipped => "skip",
        };
        write!(f, "{} {} {} {}", verdict, self.name, self.method, self.path)?;
        if let Some(status) = self.status {
            write!(f, " -> {}", status)?;
        }
        if let Some(failure) = self.failure() {
            write!(f, " ({})", failure)?;
        }
        Ok(())
    }
}

/// Outcome of a whole scenario.
#[derive(Debug)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Main steps, in order.
    pub steps: Vec<StepOutcome>,
    /// Teardown steps, in order.
    pub teardown: Vec<StepOutcome>,
}

impl ScenarioReport {
    /// Returns true if every main step passed. Teardown does not count.
    pub fn passed(&self) -> bool {
        self.steps.iter().all(StepOutcome::passed)
    }

    /// The first failed main step, if any.
    pub fn first_failure(&self) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.failure().is_some())
    }

    /// Look up a main step outcome by name.
    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.name == name)
    }
}

impl std::fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.passed() { "PASS" } else { "FAIL" };
        writeln!(f, "{} {}", verdict, self.name)?;
        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }
        for step in &self.teardown {
            writeln!(f, "  teardown: {}", step)?;
        }
        Ok(())
    }
}

/// A named sequence of steps with teardown.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    token: Option<String>,
    steps: Vec<Step>,
    teardown: Vec<Step>,
}

impl Scenario {
    /// Create an empty scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            token: None,
            steps: Vec::new(),
            teardown: Vec::new(),
        }
    }

    /// Run this scenario with another bearer credential.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Append a main step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append a teardown step.
    pub fn teardown(mut self, step: Step) -> Self {
        self.teardown.push(step);
        self
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bearer credential override, if any.
    pub fn token_override(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Main steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Teardown steps.
    pub fn teardown_steps(&self) -> &[Step] {
        &self.teardown
    }

    /// Run the scenario with the given client.
    ///
    /// The token override is ignored here; [`ScenarioRunner`] applies it.
    pub async fn run(&self, client: &ApiClient) -> ScenarioReport {
        tracing::info!("Running scenario {}", self.name);

        let mut ctx = ScenarioContext::new();
        let mut steps = Vec::with_capacity(self.steps.len());
        let mut failed = false;

        for step in &self.steps {
            if failed {
                steps.push(StepOutcome::skipped(step));
                continue;
            }

            let outcome = step.run(client, &mut ctx).await;
            if let Some(failure) = outcome.failure() {
                tracing::info!("Scenario {} failed at {}: {}", self.name, step.name, failure);
                failed = true;
            }
            steps.push(outcome);
        }

        let mut teardown = Vec::with_capacity(self.teardown.len());
        for step in &self.teardown {
            if ctx.render(&step.path).is_err() {
                teardown.push(StepOutcome::skipped(step));
                continue;
            }

            let outcome = step.run(client, &mut ctx).await;
            if let Some(failure) = outcome.failure() {
                tracing::warn!("Teardown {} of {} failed: {}", step.name, self.name, failure);
            }
            teardown.push(outcome);
        }

        let report = ScenarioReport {
            name: self.name.clone(),
            steps,
            teardown,
        };
        tracing::info!(
            "Scenario {} {}",
            self.name,
            if report.passed() { "passed" } else { "failed" }
        );
        report
    }

    /// Report for a scenario that could not start.
    fn aborted(&self, error: ApiError) -> ScenarioReport {
        let mut steps: Vec<_> = self.steps.iter().map(StepOutcome::skipped).collect();
        match steps.first_mut() {
            Some(first) => first.result = StepResult::Failed(StepFailure::Transport(error)),
            None => tracing::warn!("Scenario {} could not start: {}", self.name, error),
        }

        ScenarioReport {
            name: self.name.clone(),
            steps,
            teardown: self.teardown.iter().map(StepOutcome::skipped).collect(),
        }
    }
}

/// Runs scenarios against one API configuration.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    client: ApiClient,
}

impl ScenarioRunner {
    /// Create a runner, building the authenticated client.
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        Ok(Self::from_client(ApiClient::new(config)?))
    }

    /// Create a runner around an existing client.
    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// The default client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Run one scenario.
    ///
    /// A scenario carrying a token override runs with a client built from
    /// the same configuration and that token.
    pub async fn run(&self, scenario: &Scenario) -> ScenarioReport {
        match scenario.token_override() {
            None => scenario.run(&self.client).await,
            Some(token) => match ApiClient::new(self.client.config().with_token(token)) {
                Ok(client) => scenario.run(&client).await,
                Err(e) => scenario.aborted(e),
            },
        }
    }

    /// Run scenarios one after another.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioReport> {
        let mut reports = Vec::with_capacity(scenarios.len());
        for scenario in scenarios {
            reports.push(self.run(scenario).await);
        }
        reports
    }
}
