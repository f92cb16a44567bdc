// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic commit of one reputation transition.
//!
//! The user row is read, the transition is computed from what was read, and
//! the counters, status and reputation event are written, all inside one
//! transaction. Writers for the same user serialize:
//!
//! - `SQLite`: `BEGIN IMMEDIATE` takes the database write lock before the read.
//! - `MySQL`: `SELECT ... FOR UPDATE` locks the user row inside the transaction.

use cageside::{CoreError, EngineError, TransitionResult};
use cageside_domain::{Reputation, UserId};
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
#[cfg(feature = "mysql")]
use diesel::connection::Connection;

use crate::data_models::UserRow;
use crate::error::PersistenceError;
use crate::mutations::audit::insert_reputation_event_sqlite;
use crate::mutations::now_rfc3339;
use crate::mutations::reputation::{insert_user_sqlite, update_counters_sqlite};
use crate::queries::reputation::find_user_sqlite;

#[cfg(feature = "mysql")]
use crate::mutations::audit::insert_reputation_event_mysql;
#[cfg(feature = "mysql")]
use crate::mutations::reputation::{insert_user_mysql, update_counters_mysql};
#[cfg(feature = "mysql")]
use crate::queries::reputation::find_user_for_update_mysql;

/// Why a commit did not happen.
#[derive(Debug)]
pub enum CommitFailure {
    /// The transition rejected the command. Nothing was written.
    Rejected(CoreError),
    /// The database failed. The transaction was rolled back.
    Store(PersistenceError),
}

impl From<diesel::result::Error> for CommitFailure {
    fn from(err: diesel::result::Error) -> Self {
        Self::Store(PersistenceError::from(err))
    }
}

impl From<PersistenceError> for CommitFailure {
    fn from(err: PersistenceError) -> Self {
        Self::Store(err)
    }
}

impl From<CommitFailure> for EngineError<PersistenceError> {
    fn from(failure: CommitFailure) -> Self {
        match failure {
            CommitFailure::Rejected(err) => Self::Rejected(err),
            CommitFailure::Store(err) => Self::Store(err),
        }
    }
}

fn load_current(row: Option<UserRow>) -> Result<Option<Reputation>, PersistenceError> {
    row.map(UserRow::into_reputation).transpose()
}

/// Commits one transition on `SQLite`.
///
/// # Errors
///
/// Returns [`CommitFailure::Rejected`] if the transition fails and
/// [`CommitFailure::Store`] if the database fails.
pub fn commit_sqlite<F>(
    conn: &mut SqliteConnection,
    user_id: &UserId,
    transition: F,
) -> Result<TransitionResult, CommitFailure>
where
    F: FnOnce(Option<&Reputation>) -> Result<TransitionResult, CoreError>,
{
    conn.immediate_transaction::<TransitionResult, CommitFailure, _>(|conn| {
        let current: Option<Reputation> = load_current(find_user_sqlite(conn, user_id.as_str())?)?;
        let mut result: TransitionResult =
            transition(current.as_ref()).map_err(CommitFailure::Rejected)?;
        let timestamp: String = now_rfc3339()?;

        if current.is_some() {
            update_counters_sqlite(conn, &result.after)?;
        } else {
            insert_user_sqlite(conn, &result.after, &timestamp)?;
        }
        let event_id: i64 = insert_reputation_event_sqlite(conn, &result.audit_event, &timestamp)?;
        result.audit_event.event_id = Some(event_id);

        Ok(result)
    })
}

/// Commits one transition on `MySQL`/`MariaDB`.
///
/// # Errors
///
/// Returns [`CommitFailure::Rejected`] if the transition fails and
/// [`CommitFailure::Store`] if the database fails.
#[cfg(feature = "mysql")]
pub fn commit_mysql<F>(
    conn: &mut MysqlConnection,
    user_id: &UserId,
    transition: F,
) -> Result<TransitionResult, CommitFailure>
where
    F: FnOnce(Option<&Reputation>) -> Result<TransitionResult, CoreError>,
{
    conn.transaction::<TransitionResult, CommitFailure, _>(|conn| {
        let current: Option<Reputation> =
            load_current(find_user_for_update_mysql(conn, user_id.as_str())?)?;
        let mut result: TransitionResult =
            transition(current.as_ref()).map_err(CommitFailure::Rejected)?;
        let timestamp: String = now_rfc3339()?;

        if current.is_some() {
            update_counters_mysql(conn, &result.after)?;
        } else {
            insert_user_mysql(conn, &result.after, &timestamp)?;
        }
        let event_id: i64 = insert_reputation_event_mysql(conn, &result.audit_event, &timestamp)?;
        result.audit_event.event_id = Some(event_id);

        Ok(result)
    })
}
