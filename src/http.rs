//! HTTP transport setup for the users API client.
//!
//! This module builds the shared `reqwest` client from an
//! [`ApiClientConfig`]: rustls TLS with the built-in web PKI roots, the
//! optional request timeout and the default headers sent on every request.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

use crate::config::ApiClientConfig;
use crate::error::{ApiError, Result};
use crate::types::content_types;

/// Build a reqwest Client for the given configuration.
///
/// The bearer credential is not installed here; it is attached per request
/// by [`ApiClient`](crate::client::ApiClient).
pub fn build_http_client(config: &ApiClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .use_rustls_tls()
        .tls_built_in_root_certs(true)
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .user_agent(config.user_agent.as_str());

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder = builder.default_headers(default_headers(config)?);

    builder
        .build()
        .map_err(|e| ApiError::invalid_config(format!("Failed to build HTTP client: {}", e)))
}

/// Headers sent with every request.
fn default_headers(config: &ApiClientConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(content_types::JSON));

    for (name, value) in &config.additional_headers {
        let name = HeaderName::try_from(name.as_str())
            .map_err(|e| ApiError::invalid_config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::try_from(value.as_str())
            .map_err(|e| ApiError::invalid_config(format!("Invalid value for header '{}': {}", name, e)))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
