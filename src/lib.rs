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

//! # gorest-users-client
//!
//! An authenticated client and end-to-end scenario runner for the GoRest
//! `users` REST API.
//!
//! The remote service is external and keeps its data between runs. This
//! crate does not implement it; it only probes it and checks status codes
//! and response shapes.
//!
//! ## Features
//!
//! - **Bearer-authenticated client** with `get` / `post` / `put` / `delete`
//! - **Every status observed**: 4xx/5xx resolve to an [`ApiResponse`],
//!   classified by [`ApiResponse::error`]
//! - **Scenario runner** with captured variables, status and body-shape
//!   expectations, and teardown that always runs
//! - **Built-in suites** covering listing, the CRUD lifecycle, validation
//!   and authentication failures
//!
//! ## Quick Start
//!
//! ```no_run
//! use gorest_users_client::{ApiClient, ApiClientConfig, UsersApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads API_URL and BEARER_TOKEN
//!     let config = ApiClientConfig::from_env()?;
//!     let users = UsersApi::new(ApiClient::new(config)?);
//!
//!     let response = users.list().await?;
//!     println!("GET /users -> {}", response.status());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Running the built-in suites
//!
//! ```no_run
//! use gorest_users_client::{suites, ApiClientConfig, ScenarioRunner};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let runner = ScenarioRunner::new(ApiClientConfig::from_env()?)?;
//!
//! for report in runner.run_all(&suites::all()).await {
//!     print!("{}", report);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod fixture;
pub mod http;
pub mod scenario;
pub mod suites;
pub mod types;
pub mod users;

// Re-export main types at crate root for convenience
pub use client::ApiClient;
pub use config::{ApiClientConfig, ApiClientConfigBuilder, API_URL_VAR, BEARER_TOKEN_VAR};
pub use error::{ApiError, Result};
pub use scenario::{Expectation, Scenario, ScenarioReport, ScenarioRunner, Step};
pub use types::{ApiMessage, ApiResponse, FieldError, Method, NewUser, RemoteError, User, UserUpdate};
pub use users::UsersApi;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// User-Agent string for HTTP requests.
pub const USER_AGENT: &str = concat!("gorest-users-client/", env!("CARGO_PKG_VERSION"));
