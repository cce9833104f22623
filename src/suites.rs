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

//! Built-in end-to-end scenarios for the `users` resource.
//!
//! Every constructor builds fresh payloads (unique emails), so a scenario
//! value can be run once per construction without colliding with data left
//! on the remote service by earlier runs.

use serde_json::json;

use crate::fixture::{sample_user, unique_email};
use crate::scenario::{Expectation, Scenario, Step};
use crate::users::{collection_path, member_path};

/// Message of a 422 entry for a missing required field.
pub const BLANK: &str = "can't be blank";

/// Message of a 422 entry for a malformed email.
pub const INVALID: &str = "is invalid";

/// Message of a 422 entry for an email in use.
pub const TAKEN: &str = "has already been taken";

/// Body message of a 404 response.
pub const NOT_FOUND: &str = "Resource not found";

/// Body message of a 401 response.
pub const INVALID_TOKEN: &str = "Invalid token";

/// Credential used by [`invalid_token`].
pub const BOGUS_TOKEN: &str = "invalid-token";

/// Names accepted by [`by_name`], in [`all`] order.
pub const NAMES: &[&str] = &[
    "listing",
    "crud_lifecycle",
    "missing_required_fields",
    "invalid_email",
    "duplicate_email",
    "invalid_token",
];

/// `GET /users` answers 200 with a JSON array.
pub fn listing() -> Scenario {
    Scenario::new("listing").step(
        Step::get("list users", collection_path()).expect(Expectation::status(200).array()),
    )
}

/// Create, read, update and delete one user, then confirm it is gone.
pub fn crud_lifecycle() -> Scenario {
    let user = sample_user();
    let user_path = member_path("{user_id}");

    Scenario::new("crud_lifecycle")
        .step(
            Step::post("create user", collection_path(), json!(user))
                .capture("id", "user_id")
                .expect(
                    Expectation::status(201)
                        .has_field("id")
                        .field_eq("email", user.email.as_str()),
                ),
        )
        .step(
            Step::get("retrieve user", &user_path)
                .expect(Expectation::status(200).field_eq_var("id", "user_id")),
        )
        .step(
            Step::put("update user", &user_path, json!({ "name": "Updated Test User" }))
                .expect(Expectation::status(200).field_eq("name", "Updated Test User")),
        )
        .step(Step::delete("delete user", &user_path).expect(Expectation::status(204)))
        .step(
            Step::get("retrieve deleted user", &user_path)
                .expect(Expectation::status(404).message(NOT_FOUND)),
        )
        .teardown(cleanup("user_id"))
}

/// Creating a user with only an email reports every other field as blank.
pub fn missing_required_fields() -> Scenario {
    Scenario::new("missing_required_fields")
        .step(
            Step::post(
                "create user without name, gender, status",
                collection_path(),
                json!({ "email": unique_email("invaliduser") }),
            )
            .capture("id", "user_id")
            .expect(
                Expectation::status(422)
                    .field_error("name", BLANK)
                    .field_error("gender", BLANK)
                    .field_error("status", BLANK),
            ),
        )
        .teardown(cleanup("user_id"))
}

/// Creating a user with a malformed email is rejected.
pub fn invalid_email() -> Scenario {
    let user = sample_user()
        .with_name("Invalid Email User")
        .with_email("invalid-email");

    Scenario::new("invalid_email")
        .step(
            Step::post("create user with invalid email", collection_path(), json!(user))
                .capture("id", "user_id")
                .expect(Expectation::status(422).field_error_exact("email", INVALID)),
        )
        .teardown(cleanup("user_id"))
}

/// A second creation with the same email is rejected.
pub fn duplicate_email() -> Scenario {
    let first = sample_user();
    let second = sample_user()
        .with_name("Duplicate Test User")
        .with_email(first.email.clone());

    Scenario::new("duplicate_email")
        .step(
            Step::post("create user", collection_path(), json!(first))
                .capture("id", "user_id")
                .expect(Expectation::status(201).has_field("id")),
        )
        .step(
            Step::post("create user with same email", collection_path(), json!(second))
                .capture("id", "duplicate_id")
                .expect(Expectation::status(422).field_error_exact("email", TAKEN)),
        )
        .teardown(cleanup("user_id"))
        .teardown(cleanup("duplicate_id"))
}

/// Every verb and path answers 401 to an invalid bearer token.
pub fn invalid_token() -> Scenario {
    let unauthorized = || Expectation::status(401).message(INVALID_TOKEN);
    let user = json!(sample_user());
    // Any id works: authentication is checked before existence.
    let some_user = member_path(1);

    Scenario::new("invalid_token")
        .with_token(BOGUS_TOKEN)
        .step(Step::get("list users", collection_path()).expect(unauthorized()))
        .step(
            Step::post("create user", collection_path(), user)
                .capture("id", "user_id")
                .expect(unauthorized()),
        )
        .step(Step::get("retrieve user", &some_user).expect(unauthorized()))
        .step(
            Step::put("update user", &some_user, json!({ "name": "Updated Test User" }))
                .expect(unauthorized()),
        )
        .step(Step::delete("delete user", &some_user).expect(unauthorized()))
        .teardown(cleanup("user_id"))
}

/// Every built-in scenario, in [`NAMES`] order.
pub fn all() -> Vec<Scenario> {
    vec![
        listing(),
        crud_lifecycle(),
        missing_required_fields(),
        invalid_email(),
        duplicate_email(),
        invalid_token(),
    ]
}

/// Build the built-in scenario with this name.
pub fn by_name(name: &str) -> Option<Scenario> {
    match name {
        "listing" => Some(listing()),
        "crud_lifecycle" => Some(crud_lifecycle()),
        "missing_required_fields" => Some(missing_required_fields()),
        "invalid_email" => Some(invalid_email()),
        "duplicate_email" => Some(duplicate_email()),
        "invalid_token" => Some(invalid_token()),
        _ => None,
    }
}

/// Teardown step deleting the user captured in `var`, if any.
fn cleanup(var: &str) -> Step {
    Step::delete(format!("delete {{{}}}", var), member_path(format!("{{{}}}", var)))
        .expect(Expectation::status_in(&[204, 404]))
}
