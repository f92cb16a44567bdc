// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use crate::counters::Counter;
use crate::error::DomainError;

/// A forum activity that affects the target user's reputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Someone liked content authored by the target.
    LikeReceived,
    /// One of the target's threads was named Post of the Day.
    PotdReceived,
    /// An administrator pinned one of the target's threads globally.
    PinReceived,
    /// A user pinned one of the target's threads (legacy feature).
    UserPinReceived,
    /// Someone replied to one of the target's threads.
    ReplyReceived,
    /// The target created a thread or reply.
    PostCreated,
}

const ALL_KINDS: [EventKind; 6] = [
    EventKind::LikeReceived,
    EventKind::PotdReceived,
    EventKind::PinReceived,
    EventKind::UserPinReceived,
    EventKind::ReplyReceived,
    EventKind::PostCreated,
];

impl EventKind {
    /// Returns the wire name, e.g. `LIKE_RECEIVED`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LikeReceived => "LIKE_RECEIVED",
            Self::PotdReceived => "POTD_RECEIVED",
            Self::PinReceived => "PIN_RECEIVED",
            Self::UserPinReceived => "USER_PIN_RECEIVED",
            Self::ReplyReceived => "REPLY_RECEIVED",
            Self::PostCreated => "POST_CREATED",
        }
    }

    /// The counter this event moves.
    #[must_use]
    pub const fn counter(&self) -> Counter {
        match self {
            Self::LikeReceived => Counter::Likes,
            Self::PotdReceived => Counter::Potd,
            Self::PinReceived => Counter::Pinned,
            Self::UserPinReceived => Counter::PinnedByUser,
            Self::ReplyReceived => Counter::Replies,
            Self::PostCreated => Counter::Posts,
        }
    }

    /// Every event kind.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &ALL_KINDS
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownEventKind(s.to_string()))
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a counter change: an activity or its reversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Delta {
    /// `+1`
    Increment,
    /// `-1`, issued when content is deleted or an action is retracted.
    Decrement,
}

impl Delta {
    /// Moves `value` by `amount` in this direction, flooring at zero.
    #[must_use]
    pub const fn apply_to(self, value: u64, amount: u64) -> u64 {
        match self {
            Self::Increment => value.saturating_add(amount),
            Self::Decrement => value.saturating_sub(amount),
        }
    }

    /// Returns the signed value, `1` or `-1`.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        match self {
            Self::Increment => 1,
            Self::Decrement => -1,
        }
    }
}

impl TryFrom<i64> for Delta {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Increment),
            -1 => Ok(Self::Decrement),
            other => Err(DomainError::InvalidDelta(other)),
        }
    }
}

impl From<Delta> for i64 {
    fn from(value: Delta) -> Self {
        value.as_i64()
    }
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+}", self.as_i64())
    }
}

/// Points awarded per event kind.
///
/// Kinds without an explicit weight are worth one point.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointWeights {
    weights: HashMap<EventKind, u64>,
}

/// Weight used for any kind that has not been configured.
pub const DEFAULT_WEIGHT: u64 = 1;

/// Largest accepted weight. Keeps stored points well inside `i64`.
pub const MAX_WEIGHT: u64 = 1_000_000;

impl PointWeights {
    /// Builds a weight table from `(kind, weight)` pairs such as those read
    /// from a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if a kind is unknown, or a weight is negative or
    /// above [`MAX_WEIGHT`].
    pub fn from_entries<I>(entries: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut weights: HashMap<EventKind, u64> = HashMap::new();
        for (name, raw) in entries {
            let kind: EventKind = name.parse().map_err(|_| DomainError::InvalidWeight {
                kind: name.clone(),
                reason: String::from("unknown event kind"),
            })?;
            let weight: u64 = u64::try_from(raw).map_err(|_| DomainError::InvalidWeight {
                kind: name.clone(),
                reason: format!("weight {raw} is negative"),
            })?;
            if weight > MAX_WEIGHT {
                return Err(DomainError::InvalidWeight {
                    kind: name,
                    reason: format!("weight {weight} exceeds {MAX_WEIGHT}"),
                });
            }
            weights.insert(kind, weight);
        }
        Ok(Self { weights })
    }

    /// Returns the weight for `kind`.
    #[must_use]
    pub fn weight(&self, kind: EventKind) -> u64 {
        self.weights.get(&kind).copied().unwrap_or(DEFAULT_WEIGHT)
    }

    /// Returns the effective weight of every kind, in declaration order.
    #[must_use]
    pub fn effective(&self) -> Vec<(EventKind, u64)> {
        ALL_KINDS
            .iter()
            .map(|kind| (*kind, self.weight(*kind)))
            .collect()
    }
}
