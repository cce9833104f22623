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

//! Expectations on a resolved response.
//!
//! An [`Expectation`] is checked in two stages: the status code first, then
//! each body check in declaration order. The first mismatch is reported.

use serde_json::Value;

use super::{ScenarioContext, StepFailure};
use crate::types::ApiResponse;

/// A check on the shape or content of a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCheck {
    /// The body is a JSON array.
    IsArray,

    /// The body is an object carrying the field.
    HasField(String),

    /// The field equals a literal value.
    FieldEquals {
        /// Field name.
        field: String,
        /// Expected value.
        value: Value,
    },

    /// The field equals a previously captured variable.
    FieldEqualsVar {
        /// Field name.
        field: String,
        /// Variable name.
        var: String,
    },

    /// The body is an array of `{field, message}` entries containing one for
    /// `field` whose message contains (or, if `exact`, equals) `message`.
    FieldError {
        /// Field name.
        field: String,
        /// Message text.
        message: String,
        /// Require an exact message match.
        exact: bool,
    },

    /// The body is `{ "message": <text> }`.
    Message(String),
}

impl BodyCheck {
    /// Human-readable description of the check.
    pub fn description(&self) -> String {
        match self {
            Self::IsArray => "body is an array".to_string(),
            Self::HasField(field) => format!("body has field '{}'", field),
            Self::FieldEquals { field, value } => format!("'{}' equals {}", field, value),
            Self::FieldEqualsVar { field, var } => format!("'{}' equals {{{}}}", field, var),
            Self::FieldError {
                field,
                message,
                exact: true,
            } => format!("error on '{}' is '{}'", field, message),
            Self::FieldError { field, message, .. } => {
                format!("error on '{}' contains '{}'", field, message)
            }
            Self::Message(text) => format!("message is '{}'", text),
        }
    }

    fn check(&self, body: &Value, ctx: &ScenarioContext) -> Result<(), String> {
        match self {
            Self::IsArray => body
                .is_array()
                .then_some(())
                .ok_or_else(|| format!("expected an array, got {}", kind(body))),

            Self::HasField(field) => body
                .get(field)
                .map(|_| ())
                .ok_or_else(|| format!("missing field '{}' in {}", field, body)),

            Self::FieldEquals { field, value } => field_equals(body, field, value),

            Self::FieldEqualsVar { field, var } => {
                let value = ctx
                    .get(var)
                    .ok_or_else(|| format!("variable '{}' was never captured", var))?;
                field_equals(body, field, value)
            }

            Self::FieldError {
                field,
                message,
                exact,
            } => {
                let entries = body
                    .as_array()
                    .ok_or_else(|| format!("expected an error array, got {}", kind(body)))?;

                let found = entries.iter().any(|entry| {
                    let same_field = entry.get("field").and_then(Value::as_str) == Some(field.as_str());
                    let text = entry.get("message").and_then(Value::as_str).unwrap_or("");
                    let matches = if *exact {
                        text == message
                    } else {
                        text.contains(message.as_str())
                    };
                    same_field && matches
                });

                found
                    .then_some(())
                    .ok_or_else(|| format!("no {} in {}", self.description(), body))
            }

            Self::Message(text) => match body.get("message").and_then(Value::as_str) {
                Some(actual) if actual == text => Ok(()),
                Some(actual) => Err(format!("message is '{}', expected '{}'", actual, text)),
                None => Err(format!("no message in {}", body)),
            },
        }
    }
}

fn field_equals(body: &Value, field: &str, expected: &Value) -> Result<(), String> {
    match body.get(field) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(format!("'{}' is {}, expected {}", field, actual, expected)),
        None => Err(format!("missing field '{}' in {}", field, body)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "an empty body",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Accepted status codes plus body checks for one step.
///
/// An expectation with no status codes accepts any status.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expectation {
    statuses: Vec<u16>,
    checks: Vec<BodyCheck>,
}

impl Expectation {
    /// Accept any status, check nothing.
    pub fn any() -> Self {
        Self::default()
    }

    /// Require a status code.
    pub fn status(code: u16) -> Self {
        Self {
            statuses: vec![code],
            checks: Vec::new(),
        }
    }

    /// Accept any of the given status codes.
    pub fn status_in(codes: &[u16]) -> Self {
        Self {
            statuses: codes.to_vec(),
            checks: Vec::new(),
        }
    }

    /// Require a JSON array body.
    pub fn array(self) -> Self {
        self.check(BodyCheck::IsArray)
    }

    /// Require an object body carrying `field`.
    pub fn has_field(self, field: impl Into<String>) -> Self {
        self.check(BodyCheck::HasField(field.into()))
    }

    /// Require `field` to equal `value`.
    pub fn field_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.check(BodyCheck::FieldEquals {
            field: field.into(),
            value: value.into(),
        })
    }

    /// Require `field` to equal the captured variable `var`.
    pub fn field_eq_var(self, field: impl Into<String>, var: impl Into<String>) -> Self {
        self.check(BodyCheck::FieldEqualsVar {
            field: field.into(),
            var: var.into(),
        })
    }

    /// Require a validation entry for `field` whose message contains `message`.
    pub fn field_error(self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.check(BodyCheck::FieldError {
            field: field.into(),
            message: message.into(),
            exact: false,
        })
    }

    /// Require a validation entry `{field, message}` with this exact message.
    pub fn field_error_exact(self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.check(BodyCheck::FieldError {
            field: field.into(),
            message: message.into(),
            exact: true,
        })
    }

    /// Require a `{ "message": text }` body.
    pub fn message(self, text: impl Into<String>) -> Self {
        self.check(BodyCheck::Message(text.into()))
    }

    /// Add an arbitrary body check.
    pub fn check(mut self, check: BodyCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Accepted status codes.
    pub fn statuses(&self) -> &[u16] {
        &self.statuses
    }

    /// Body checks, in evaluation order.
    pub fn checks(&self) -> &[BodyCheck] {
        &self.checks
    }

    /// Verify a response: status first, then each body check.
    pub fn verify(&self, response: &ApiResponse, ctx: &ScenarioContext) -> Result<(), StepFailure> {
        if !self.statuses.is_empty() && !self.statuses.contains(&response.status()) {
            return Err(StepFailure::Status {
                expected: self.statuses.clone(),
                actual: response.status(),
                body: response.body().clone(),
            });
        }

        for check in &self.checks {
            check.check(response.body(), ctx).map_err(StepFailure::Shape)?;
        }

        Ok(())
    }
}
