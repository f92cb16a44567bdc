// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_audit::AuditEvent;
use cageside_domain::{Reputation, UserId, UserRole};

use crate::error::{CoreError, EngineError};
use crate::state::TransitionResult;

/// Persistence port for reputation records.
///
/// Implementations must make [`ReputationStore::commit_counters`] a single
/// atomic read-modify-write: the record is read and locked, the transition
/// is computed from what was read, and the new counters, points, status and
/// audit row are written together or not at all. Concurrent commits for the
/// same user must serialize.
pub trait ReputationStore {
    /// The store's own error type. Surfaced to callers unchanged.
    type Error: std::error::Error + 'static;

    /// Reads a user's current record.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_counters(&mut self, user_id: &UserId) -> Result<Option<Reputation>, Self::Error>;

    /// Atomically reads the record for `user_id`, hands it to `transition`,
    /// and persists the result.
    ///
    /// A `None` record with a successful transition inserts a new user. If
    /// `transition` fails nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Rejected`] if `transition` fails and
    /// [`EngineError::Store`] if the store fails.
    fn commit_counters<F>(
        &mut self,
        user_id: &UserId,
        transition: F,
    ) -> Result<TransitionResult, EngineError<Self::Error>>
    where
        F: FnOnce(Option<&Reputation>) -> Result<TransitionResult, CoreError>;

    /// Updates the role stored for an existing user.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_role(&mut self, user_id: &UserId, role: UserRole) -> Result<(), Self::Error>;

    /// Reads the RFC 3339 time a user was registered, if they exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn registered_at(&mut self, user_id: &UserId) -> Result<Option<String>, Self::Error>;

    /// Reads every user's record in one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn score_snapshot(&mut self) -> Result<Vec<Reputation>, Self::Error>;

    /// Reads the audit trail for one user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn audit_trail(&mut self, user_id: &UserId) -> Result<Vec<AuditEvent>, Self::Error>;
}
