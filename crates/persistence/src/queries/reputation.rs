// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
#[cfg(feature = "mysql")]
use diesel::MysqlConnection;
use diesel::SqliteConnection;
use num_traits::ToPrimitive;

use crate::data_models::UserRow;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

backend_fn! {
/// Reads one user row.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_user(conn: &mut _, user_id: &str) -> Result<Option<UserRow>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .first::<UserRow>(conn)
        .optional()?)
}
}

/// Reads one user row and locks it until the enclosing transaction ends.
///
/// # Errors
///
/// Returns an error if the query fails.
#[cfg(feature = "mysql")]
pub fn find_user_for_update_mysql(
    conn: &mut MysqlConnection,
    user_id: &str,
) -> Result<Option<UserRow>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .select(UserRow::as_select())
        .for_update()
        .first::<UserRow>(conn)
        .optional()?)
}

backend_fn! {
/// Reads every user row, highest points first and user id ascending
/// within equal points.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_users_by_points(conn: &mut _) -> Result<Vec<UserRow>, PersistenceError> {
    Ok(users::table
        .select(UserRow::as_select())
        .order((users::points.desc(), users::user_id.asc()))
        .load::<UserRow>(conn)?)
}
}

backend_fn! {
/// Reads the registration timestamp of a user.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_registered_at(conn: &mut _, user_id: &str) -> Result<Option<String>, PersistenceError> {
    Ok(users::table
        .filter(users::user_id.eq(user_id))
        .select(users::registered_at)
        .first::<String>(conn)
        .optional()?)
}
}

backend_fn! {
/// Counts registered users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut _) -> Result<usize, PersistenceError> {
    let count: i64 = users::table.count().get_result(conn)?;
    count
        .to_usize()
        .ok_or_else(|| PersistenceError::ValueOutOfRange(format!("user count {count}")))
}
}
