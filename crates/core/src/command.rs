// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use cageside_domain::{Delta, EventKind, UserId, UserRole, Username};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request reputation changes. Counters are
/// never set directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the zeroed reputation record for a newly synced user.
    RegisterUser {
        /// The id issued by the identity provider.
        user_id: UserId,
        /// The username at first sync.
        username: Username,
        /// The role at first sync.
        role: UserRole,
    },
    /// Apply one forum activity (or its reversal) to a user.
    ApplyEvent {
        /// The user whose reputation changes.
        target: UserId,
        /// What happened.
        kind: EventKind,
        /// `+1` for the activity, `-1` for its retraction.
        delta: Delta,
    },
}

impl Command {
    /// The user whose record this command touches.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        match self {
            Self::RegisterUser { user_id, .. } => user_id,
            Self::ApplyEvent { target, .. } => target,
        }
    }
}
