// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::reputation::Reputation;
use crate::types::{UserId, Username};

/// Validates that no record exists yet for `user_id`.
///
/// # Errors
///
/// Returns [`DomainError::DuplicateUser`] if `existing` is present.
pub fn validate_user_absent(
    existing: Option<&Reputation>,
    user_id: &UserId,
) -> Result<(), DomainError> {
    match existing {
        Some(_) => Err(DomainError::DuplicateUser(user_id.clone())),
        None => Ok(()),
    }
}

/// Validates that an identity sync does not rename an existing user.
///
/// Usernames are immutable once set. The comparison is exact after the
/// trimming performed by [`Username::new`].
///
/// # Errors
///
/// Returns [`DomainError::UsernameImmutable`] if the names differ.
pub fn validate_username_unchanged(
    existing: &Reputation,
    requested: &Username,
) -> Result<(), DomainError> {
    if existing.username() == requested {
        return Ok(());
    }
    Err(DomainError::UsernameImmutable {
        user_id: existing.user_id().clone(),
        existing: existing.username().clone(),
        requested: requested.as_str().to_string(),
    })
}

/// Validates that an event target has a reputation record.
///
/// # Errors
///
/// Returns [`DomainError::UserNotFound`] if `existing` is absent.
pub fn require_user<'a>(
    existing: Option<&'a Reputation>,
    user_id: &UserId,
) -> Result<&'a Reputation, DomainError> {
    existing.ok_or_else(|| DomainError::UserNotFound(user_id.clone()))
}
