// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{UserId, Username};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The external user identifier is empty or malformed.
    InvalidUserId(String),
    /// The username is empty or too long.
    InvalidUsername(String),
    /// The event kind is not one the engine understands.
    UnknownEventKind(String),
    /// The delta is not `+1` or `-1`.
    InvalidDelta(i64),
    /// The role is not one the identity provider is known to issue.
    UnknownRole(String),
    /// A stored status label does not match any rung of the ladder.
    UnknownStatus(String),
    /// A configured point weight is unusable.
    InvalidWeight {
        /// The event kind the weight was configured for.
        kind: String,
        /// Description of the problem.
        reason: String,
    },
    /// The leaderboard page request is out of range.
    InvalidPageRequest {
        /// The requested page (1-based).
        page: u32,
        /// The requested page size.
        page_size: u32,
    },
    /// The target user has no reputation record.
    UserNotFound(UserId),
    /// A user with this id is already registered.
    DuplicateUser(UserId),
    /// A registration attempted to change an existing username.
    UsernameImmutable {
        /// The user whose username was to be changed.
        user_id: UserId,
        /// The stored username.
        existing: Username,
        /// The username supplied by the caller.
        requested: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUserId(msg) => write!(f, "Invalid user id: {msg}"),
            Self::InvalidUsername(msg) => write!(f, "Invalid username: {msg}"),
            Self::UnknownEventKind(kind) => write!(f, "Unknown event kind: '{kind}'"),
            Self::InvalidDelta(delta) => {
                write!(f, "Invalid delta: {delta}. Must be exactly +1 or -1")
            }
            Self::UnknownRole(role) => write!(f, "Unknown role: '{role}'"),
            Self::UnknownStatus(label) => write!(f, "Unknown status: '{label}'"),
            Self::InvalidWeight { kind, reason } => {
                write!(f, "Invalid point weight for {kind}: {reason}")
            }
            Self::InvalidPageRequest { page, page_size } => {
                write!(
                    f,
                    "Invalid page request: page {page}, page size {page_size}. Page must be at least 1 and page size between 1 and {}",
                    crate::leaderboard::MAX_PAGE_SIZE
                )
            }
            Self::UserNotFound(user_id) => write!(f, "User '{user_id}' not found"),
            Self::DuplicateUser(user_id) => write!(f, "User '{user_id}' already exists"),
            Self::UsernameImmutable {
                user_id,
                existing,
                requested,
            } => {
                write!(
                    f,
                    "Username of user '{user_id}' is '{existing}' and cannot be changed to '{requested}'"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
