// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reputation event queries.

use cageside_audit::AuditEvent;
use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;

use crate::data_models::ReputationEventRow;
use crate::diesel_schema::reputation_events;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a reputation event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
#[cfg(test)]
pub fn get_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let row: ReputationEventRow = reputation_events::table
        .filter(reputation_events::event_id.eq(event_id))
        .select(ReputationEventRow::as_select())
        .first::<ReputationEventRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("Reputation event {event_id}")))?;
    row.into_audit_event()
}
}

backend_fn! {
/// Retrieves every reputation event for a user, oldest first.
///
/// # Errors
///
/// Returns an error if the events cannot be retrieved or deserialized.
pub fn list_events_for_user(conn: &mut _, user_id: &str) -> Result<Vec<AuditEvent>, PersistenceError> {
    let rows: Vec<ReputationEventRow> = reputation_events::table
        .filter(reputation_events::user_id.eq(user_id))
        .order(reputation_events::event_id.asc())
        .select(ReputationEventRow::as_select())
        .load::<ReputationEventRow>(conn)?;
    rows.into_iter()
        .map(ReputationEventRow::into_audit_event)
        .collect()
}
}
