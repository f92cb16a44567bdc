// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Cageside reputation engine.
//!
//! Requests arrive as raw DTOs, are parsed into domain types, and are
//! passed to a [`cageside::RankingEngine`]. Errors from every lower layer
//! are translated explicitly into [`ApiError`]. The role display policy is
//! applied here, on the way out; the engine never special-cases roles.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error, translate_engine_error};
pub use handlers::{
    apply_event, get_history, get_leaderboard, get_standing, list_statuses, sync_user,
};
pub use request_response::{
    ApplyEventRequest, ApplyEventResponse, CountersInfo, HistoryEntryInfo, HistoryResponse,
    LeaderboardEntryInfo, LeaderboardRequest, LeaderboardResponse, StandingResponse,
    StatusInfo, StatusesResponse, SyncUserRequest, SyncUserResponse,
};
