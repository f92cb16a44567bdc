// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_domain::{Reputation, ReputationCounters, UserId, UserRole};
use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Converts a counter to its column representation.
fn column_value(column: &str, value: u64) -> Result<i64, PersistenceError> {
    value
        .to_i64()
        .ok_or_else(|| PersistenceError::ValueOutOfRange(format!("{column} = {value}")))
}

backend_fn! {
/// Inserts the row for a newly registered user.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the user id is
/// already taken.
pub fn insert_user(
    conn: &mut _,
    reputation: &Reputation,
    registered_at: &str,
) -> Result<(), PersistenceError> {
    let counters: &ReputationCounters = reputation.counters();
    diesel::insert_into(users::table)
        .values((
            users::user_id.eq(reputation.user_id().as_str()),
            users::username.eq(reputation.username().as_str()),
            users::role.eq(reputation.role().as_str()),
            users::points.eq(column_value("points", reputation.points())?),
            users::posts_count.eq(column_value("posts_count", counters.posts_count)?),
            users::likes_count.eq(column_value("likes_count", counters.likes_count)?),
            users::potd_count.eq(column_value("potd_count", counters.potd_count)?),
            users::pinned_by_user_count
                .eq(column_value("pinned_by_user_count", counters.pinned_by_user_count)?),
            users::pinned_count.eq(column_value("pinned_count", counters.pinned_count)?),
            users::replies_count.eq(column_value("replies_count", counters.replies_count)?),
            users::status.eq(reputation.status().label()),
            users::registered_at.eq(registered_at),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Writes points, counters and status of an existing user in one
/// statement.
///
/// # Errors
///
/// Returns an error if the update fails or the user does not exist.
pub fn update_counters(conn: &mut _, reputation: &Reputation) -> Result<(), PersistenceError> {
    let counters: &ReputationCounters = reputation.counters();
    let updated: usize = diesel::update(
        users::table.filter(users::user_id.eq(reputation.user_id().as_str())),
    )
    .set((
        users::points.eq(column_value("points", reputation.points())?),
        users::posts_count.eq(column_value("posts_count", counters.posts_count)?),
        users::likes_count.eq(column_value("likes_count", counters.likes_count)?),
        users::potd_count.eq(column_value("potd_count", counters.potd_count)?),
        users::pinned_by_user_count
            .eq(column_value("pinned_by_user_count", counters.pinned_by_user_count)?),
        users::pinned_count.eq(column_value("pinned_count", counters.pinned_count)?),
        users::replies_count.eq(column_value("replies_count", counters.replies_count)?),
        users::status.eq(reputation.status().label()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "User '{}'",
            reputation.user_id()
        )));
    }
    Ok(())
}
}

backend_fn! {
/// Updates the stored role of a user.
///
/// # Errors
///
/// Returns an error if the update fails or the user does not exist.
pub fn update_role(conn: &mut _, user_id: &UserId, role: UserRole) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(users::table.filter(users::user_id.eq(user_id.as_str())))
        .set(users::role.eq(role.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("User '{user_id}'")));
    }
    Ok(())
}
}
