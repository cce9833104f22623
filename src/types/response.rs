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

//! Resolved responses and the remote service's error bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, Result};

/// A resolved HTTP response: its status code and JSON body.
///
/// An empty body (as sent with `204 No Content`) is represented as
/// [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    body: Value,
}

impl ApiResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Decode a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedBody`] if a non-blank body is not JSON.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Result<Self> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new(status, Value::Null));
        }

        let body =
            serde_json::from_slice(bytes).map_err(|e| ApiError::malformed_body(status, e))?;

        Ok(Self::new(status, body))
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true for 2xx status codes.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The JSON body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the response, returning the JSON body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Look up a top-level field of an object body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.get(name)
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.body)?)
    }

    /// Require a particular status code.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::UnexpectedStatus`] carrying the body otherwise.
    pub fn expect_status(&self, expected: u16) -> Result<&Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ApiError::unexpected_status(
                expected,
                self.status,
                self.body.to_string(),
            ))
        }
    }

    /// Classify a non-2xx response. Returns `None` for success.
    pub fn error(&self) -> Option<RemoteError> {
        if self.is_success() {
            return None;
        }

        let classified = match self.status {
            422 => Vec::<FieldError>::deserialize(&self.body)
                .ok()
                .map(RemoteError::Validation),
            404 => ApiMessage::deserialize(&self.body)
                .ok()
                .map(RemoteError::NotFound),
            401 => ApiMessage::deserialize(&self.body)
                .ok()
                .map(RemoteError::Unauthorized),
            _ => None,
        };

        Some(classified.unwrap_or_else(|| RemoteError::Other {
            status: self.status,
            body: self.body.clone(),
        }))
    }
}

/// One entry of a 422 validation error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Offending field name.
    pub field: String,
    /// Human-readable reason, e.g. "can't be blank".
    pub message: String,
}

impl FieldError {
    /// Create a field error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A `{ "message": ... }` body as sent with 401 and 404 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    /// The message text.
    pub message: String,
}

/// Error reported by the remote service, as observed in a response.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// 422: one entry per rejected field.
    Validation(Vec<FieldError>),

    /// 404: the resource does not exist.
    NotFound(ApiMessage),

    /// 401: the bearer token was rejected.
    Unauthorized(ApiMessage),

    /// Any other non-2xx response, or one whose body has an unknown shape.
    Other {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: Value,
    },
}

impl RemoteError {
    /// Field errors of a validation failure (empty otherwise).
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// Find the first validation entry for `field`.
    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.field_errors().iter().find(|e| e.field == field)
    }

    /// Message of a not-found or unauthorized failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotFound(m) | Self::Unauthorized(m) => Some(&m.message),
            _ => None,
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => {
                write!(f, "validation failed:")?;
                for e in errors {
                    write!(f, " {} {};", e.field, e.message)?;
                }
                Ok(())
            }
            Self::NotFound(m) => write!(f, "not found: {}", m.message),
            Self::Unauthorized(m) => write!(f, "unauthorized: {}", m.message),
            Self::Other { status, body } => write!(f, "status {}: {}", status, body),
        }
    }
}
