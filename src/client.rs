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

//! Authenticated API client.
//!
//! This module provides the [`ApiClient`] struct: verb-scoped request
//! operations that attach the configured bearer token to every request.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;

use crate::config::ApiClientConfig;
use crate::error::Result;
use crate::http::build_http_client;
use crate::types::{content_types, ApiResponse, Method};

/// Authenticated client for the users API.
///
/// Every request is sent to `base_url + path` with
/// `Authorization: Bearer <token>`. All status codes resolve to an
/// [`ApiResponse`]; only transport failures and undecodable bodies are
/// returned as errors. Nothing is retried.
///
/// Cloning is cheap: clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use gorest_users_client::{ApiClient, ApiClientConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ApiClientConfig::from_env()?;
/// let client = ApiClient::new(config)?;
///
/// let response = client.get("/users").await?;
/// println!("GET /users -> {}", response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: ApiClientConfig,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from the
    /// configuration (e.g. an invalid additional header).
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;

        Ok(Self { config, http })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Send `GET path`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::Get, path, None).await
    }

    /// Send `POST path` with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.send(Method::Post, path, Some(&body)).await
    }

    /// Send `PUT path` with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.send(Method::Put, path, Some(&body)).await
    }

    /// Send `DELETE path`.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::Delete, path, None).await
    }

    /// Send a request with an arbitrary verb and optional JSON body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        self.send(method, path, body).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ApiResponse> {
        let url = self.config.build_url(path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method.into(), url);

        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, content_types::JSON)
                .body(serde_json::to_vec(body)?);
        }

        request = self.add_auth_header(request);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        tracing::debug!("{} {} -> {}", method, path, status);

        ApiResponse::from_bytes(status, &bytes)
    }

    /// Add the bearer token header.
    fn add_auth_header(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(AUTHORIZATION, format!("Bearer {}", self.config.token))
    }
}
