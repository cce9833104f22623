// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)

//! Variables captured while a scenario runs.
//!
//! Steps capture response fields into named variables; later steps
//! reference them as `{name}` in their path templates, for example
//! `/users/{user_id}`.

use std::collections::HashMap;

use serde_json::Value;

use super::StepFailure;

/// Per-scenario variable store.
#[derive(Debug, Clone, Default)]
pub struct ScenarioContext {
    vars: HashMap<String, Value>,
}

impl ScenarioContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Get a variable.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Returns true if the variable is set.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Expand `{name}` references in a template.
    ///
    /// String values are inserted verbatim, other JSON values in their JSON
    /// text form. A `{` without a closing `}` is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StepFailure::MissingVariable`] for a reference to an unset
    /// variable.
    pub fn render(&self, template: &str) -> Result<String, StepFailure> {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}') else {
                break;
            };
            let close = open + close;
            let name = &rest[open + 1..close];

            let value = self
                .get(name)
                .ok_or_else(|| StepFailure::MissingVariable(name.to_string()))?;

            result.push_str(&rest[..open]);
            result.push_str(&display_value(value));
            rest = &rest[close + 1..];
        }

        result.push_str(rest);
        Ok(result)
    }
}

/// Text form of a captured value.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
