// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use cageside::{CoreError, EngineError};
use cageside_domain::DomainError;
use thiserror::Error;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidUserId(msg) => ApiError::invalid("user_id", msg),
        DomainError::InvalidUsername(msg) => ApiError::invalid("username", msg),
        DomainError::UnknownEventKind(_) => ApiError::invalid("kind", err.to_string()),
        DomainError::InvalidDelta(_) => ApiError::invalid("delta", err.to_string()),
        DomainError::UnknownRole(_) => ApiError::invalid("role", err.to_string()),
        DomainError::UnknownStatus(_) => ApiError::invalid("status", err.to_string()),
        DomainError::InvalidWeight { .. } => ApiError::invalid("weights", err.to_string()),
        DomainError::InvalidPageRequest { .. } => ApiError::invalid("page", err.to_string()),
        DomainError::UserNotFound(user_id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User '{user_id}' does not exist"),
        },
        DomainError::DuplicateUser(user_id) => ApiError::DomainRuleViolation {
            rule: String::from("unique_user"),
            message: format!("User '{user_id}' is already registered"),
        },
        DomainError::UsernameImmutable {
            user_id,
            existing,
            requested,
        } => ApiError::DomainRuleViolation {
            rule: String::from("immutable_username"),
            message: format!(
                "User '{user_id}' is registered as '{existing}' and cannot be renamed to '{requested}'"
            ),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates an engine error into an API error.
///
/// Store failures are logged with their full detail and surfaced as
/// [`ApiError::Internal`].
#[must_use]
pub fn translate_engine_error<E: std::error::Error>(err: EngineError<E>) -> ApiError {
    match err {
        EngineError::Rejected(core_err) => translate_core_error(core_err),
        EngineError::Store(store_err) => {
            error!(error = %store_err, "Reputation store failure");
            ApiError::Internal {
                message: format!("Store error: {store_err}"),
            }
        }
    }
}
