// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reputation event persistence.

use cageside_audit::AuditEvent;
use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{ActionData, ActorData, CauseData};
use crate::diesel_schema::reputation_events;
use crate::error::PersistenceError;

backend_fn! {
/// Persists a reputation event.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn insert_reputation_event(
    conn: &mut _,
    event: &AuditEvent,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };
    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };

    let actor_json: String = serde_json::to_string(&actor_data)?;
    let cause_json: String = serde_json::to_string(&cause_data)?;
    let action_json: String = serde_json::to_string(&action_data)?;
    let before_json: Option<String> = event
        .before
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    let after_json: String = serde_json::to_string(&event.after)?;

    diesel::insert_into(reputation_events::table)
        .values((
            reputation_events::user_id.eq(event.user_id.as_str()),
            reputation_events::actor_json.eq(actor_json),
            reputation_events::cause_json.eq(cause_json),
            reputation_events::action_json.eq(action_json),
            reputation_events::before_snapshot_json.eq(before_json),
            reputation_events::after_snapshot_json.eq(after_json),
            reputation_events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let event_id: i64 = conn.get_last_insert_rowid()?;
    debug!(event_id, user_id = %event.user_id, action = %event.action.name, "Persisted reputation event");

    Ok(event_id)
}
}
