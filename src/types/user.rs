//! The remote `users` resource and its request payloads.

use serde::{Deserialize, Serialize};

/// A user as returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Identifier assigned by the service.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Email address, unique across the service.
    pub email: String,
    /// "male" or "female".
    pub gender: String,
    /// "active" or "inactive".
    pub status: String,
}

/// Payload for `POST /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Gender.
    pub gender: String,
    /// Status.
    pub status: String,
}

impl NewUser {
    /// Create a new creation payload.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        gender: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            gender: gender.into(),
            status: status.into(),
        }
    }

    /// Replace the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Replace the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Partial payload for `PUT /users/{id}`.
///
/// Fields left as `None` are not serialized and stay unchanged remotely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New gender.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Update the gender.
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Update the status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.gender.is_none() && self.status.is_none()
    }
}
