// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! - `reputation`: user rows and the leaderboard snapshot
//! - `audit`: reputation event history
//!
//! Functions are generated per backend (`_sqlite`, `_mysql`) by
//! `backend_fn!`. The `Persistence` adapter in `lib.rs` dispatches to the
//! version matching the active connection.

pub mod audit;
pub mod reputation;
