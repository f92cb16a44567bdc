// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_domain::DomainError;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Errors returned by [`crate::RankingEngine`] operations.
///
/// Store errors are carried through unchanged so callers can tell a
/// rejected command apart from a storage failure.
#[derive(Debug)]
pub enum EngineError<E> {
    /// The command was rejected before anything was written.
    Rejected(CoreError),
    /// The store failed.
    Store(E),
}

impl<E> EngineError<E> {
    /// Returns the domain error if the command was rejected.
    #[must_use]
    pub const fn domain_error(&self) -> Option<&DomainError> {
        match self {
            Self::Rejected(CoreError::DomainViolation(err)) => Some(err),
            Self::Store(_) => None,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for EngineError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for EngineError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl<E> From<CoreError> for EngineError<E> {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl<E> From<DomainError> for EngineError<E> {
    fn from(err: DomainError) -> Self {
        Self::Rejected(CoreError::DomainViolation(err))
    }
}
