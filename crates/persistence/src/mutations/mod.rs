// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! - `reputation`: user row inserts and counter updates
//! - `audit`: reputation event rows
//! - `transition`: the atomic read-modify-write commit
//!
//! Row-level mutations are generated per backend by `backend_fn!`. The
//! commit orchestration differs per backend in how it locks, so it is
//! written out once for each.

pub mod audit;
pub mod reputation;
pub mod transition;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Current UTC time as RFC 3339 text, the format of every timestamp column.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn now_rfc3339() -> Result<String, PersistenceError> {
    Ok(OffsetDateTime::now_utc().format(&Rfc3339)?)
}

#[cfg(feature = "mysql")]
pub use transition::commit_mysql;
pub use transition::{CommitFailure, commit_sqlite};
