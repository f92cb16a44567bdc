// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of an external user identifier.
pub const MAX_USER_ID_LEN: usize = 128;

/// Maximum length of a username.
pub const MAX_USERNAME_LEN: usize = 64;

/// Opaque identifier issued by the external identity provider.
///
/// The id is trusted as the primary key of a user record and is immutable
/// once set. Ordering is byte-wise and is used to break ranking ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a validated user id.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty, longer than [`MAX_USER_ID_LEN`],
    /// or contains whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.is_empty() {
            return Err(DomainError::InvalidUserId(String::from(
                "User id cannot be empty",
            )));
        }
        if value.chars().count() > MAX_USER_ID_LEN {
            return Err(DomainError::InvalidUserId(format!(
                "User id exceeds {MAX_USER_ID_LEN} characters"
            )));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidUserId(format!(
                "User id '{value}' contains whitespace"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name supplied by the identity provider at first sync.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a validated username. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or longer than
    /// [`MAX_USERNAME_LEN`] characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUsername(String::from(
                "Username cannot be empty",
            )));
        }
        if trimmed.chars().count() > MAX_USERNAME_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "Username exceeds {MAX_USERNAME_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Forum role assigned by the identity provider.
///
/// Roles never influence how points, status or rank are computed. They only
/// drive the display policy applied by consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    /// Regular forum member.
    #[default]
    Member,
    /// Site administrator.
    Admin,
    /// Forum moderator.
    Moderator,
    /// Verified fighter onboarded through an invitation.
    Fighter,
    /// Verified industry professional (coach, promoter, journalist).
    IndustryProfessional,
}

impl UserRole {
    /// Returns the canonical upper-case representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "MEMBER",
            Self::Admin => "ADMIN",
            Self::Moderator => "MODERATOR",
            Self::Fighter => "FIGHTER",
            Self::IndustryProfessional => "INDUSTRY_PROFESSIONAL",
        }
    }

    /// Whether status and points are hidden for this role when displayed.
    #[must_use]
    pub const fn is_status_exempt(&self) -> bool {
        !matches!(self, Self::Member)
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MEMBER" | "USER" => Ok(Self::Member),
            "ADMIN" => Ok(Self::Admin),
            "MODERATOR" => Ok(Self::Moderator),
            "FIGHTER" => Ok(Self::Fighter),
            "INDUSTRY_PROFESSIONAL" => Ok(Self::IndustryProfessional),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
