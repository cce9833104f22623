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

//! Configuration types for the users API client.
//!
//! A configuration carries the API base address and the bearer credential.
//! It is built either programmatically through [`ApiClientConfigBuilder`]
//! or from the `API_URL` / `BEARER_TOKEN` environment variables with
//! [`ApiClientConfig::from_env`].

use std::time::Duration;
use url::Url;

use crate::error::{ApiError, Result};

/// Environment variable holding the API base address.
pub const API_URL_VAR: &str = "API_URL";

/// Environment variable holding the bearer credential.
pub const BEARER_TOKEN_VAR: &str = "BEARER_TOKEN";

/// Configuration for an [`ApiClient`](crate::client::ApiClient).
#[derive(Clone)]
pub struct ApiClientConfig {
    /// API base address (e.g., "https://gorest.co.in/public/v2").
    ///
    /// Any path component is kept as a prefix for every request path.
    pub base_url: Url,

    /// Opaque bearer credential sent as `Authorization: Bearer <token>`.
    pub token: String,

    /// Optional request timeout. Requests wait indefinitely when unset.
    pub timeout: Option<Duration>,

    /// Value of the `User-Agent` header.
    pub user_agent: String,

    /// Additional HTTP headers to include in requests.
    pub additional_headers: Vec<(String, String)>,
}

impl std::fmt::Debug for ApiClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClientConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("additional_headers", &self.additional_headers.len())
            .finish()
    }
}

impl ApiClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::new()
    }

    /// Load the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingEnv`] if `API_URL` or `BEARER_TOKEN` is
    /// absent or empty, and a configuration error if the address is invalid.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// `from_env` is this function applied to `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ApiError::missing_env(name))
        };

        let base_url = require(API_URL_VAR)?;
        let token = require(BEARER_TOKEN_VAR)?;

        Self::builder().base_url(base_url)?.token(token).build()
    }

    /// Return a copy of this configuration using another bearer credential.
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..self.clone()
        }
    }

    /// Build the full URL for a request path.
    ///
    /// The path is appended to the base address the way string
    /// concatenation would: the base path prefix is preserved, exactly one
    /// `/` separates the two, and a `?query` suffix becomes the URL query.
    pub fn build_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();

        let (path, query) = match path.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (path, None),
        };

        let prefix = self.base_url.path().trim_end_matches('/');
        let suffix = path.trim_start_matches('/');
        url.set_path(&format!("{}/{}", prefix, suffix));

        if let Some(query) = query {
            url.set_query(Some(query));
        }

        url
    }
}

/// Builder for [`ApiClientConfig`].
#[derive(Default)]
pub struct ApiClientConfigBuilder {
    base_url: Option<Url>,
    token: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    additional_headers: Vec<(String, String)>,
}

impl ApiClientConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API base address.
    pub fn base_url(mut self, url: impl AsRef<str>) -> std::result::Result<Self, url::ParseError> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Set the API base address from a pre-parsed URL.
    pub fn base_url_parsed(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the bearer credential.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Add an additional HTTP header to all requests.
    pub fn add_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers.push((name.into(), value.into()));
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base address is not set or is not an
    /// absolute `http`/`https` URL, or if the token is missing or empty.
    pub fn build(self) -> Result<ApiClientConfig> {
        let base_url = self
            .base_url
            .ok_or_else(|| ApiError::invalid_config("base_url is required"))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::invalid_config(format!(
                "base_url must be an absolute http(s) URL, got '{}'",
                base_url
            )));
        }

        let token = self
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ApiError::invalid_config("token is required"))?;

        Ok(ApiClientConfig {
            base_url,
            token,
            timeout: self.timeout,
            user_agent: self
                .user_agent
                .unwrap_or_else(|| crate::USER_AGENT.to_string()),
            additional_headers: self.additional_headers,
        })
    }
}
