// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ranking::RankedEntry;
use crate::status::{Status, derive_status};
use crate::types::UserId;

/// Largest accepted leaderboard page size.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// A validated request for one leaderboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` is zero or `page_size` is outside
    /// `1..=MAX_PAGE_SIZE`.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, DomainError> {
        if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(DomainError::InvalidPageRequest { page, page_size });
        }
        Ok(Self { page, page_size })
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Index of the first entry on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let page_index: usize = usize::try_from(self.page - 1).unwrap_or(usize::MAX);
        page_index.saturating_mul(self.page_size_usize())
    }

    fn page_size_usize(&self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardPage<T> {
    pub entries: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_users: usize,
    pub total_pages: usize,
}

impl<T> LeaderboardPage<T> {
    /// Converts every entry, keeping the paging metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> LeaderboardPage<U>
    where
        F: FnMut(T) -> U,
    {
        LeaderboardPage {
            entries: self.entries.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_users: self.total_users,
            total_pages: self.total_pages,
        }
    }
}

/// Cuts one page out of a ranked list.
///
/// A page beyond the last one yields no entries but still reports the
/// totals.
#[must_use]
pub fn paginate<T: Clone>(ranked: &[T], request: PageRequest) -> LeaderboardPage<T> {
    let total_users: usize = ranked.len();
    let page_size: usize = request.page_size_usize();
    let total_pages: usize = total_users.div_ceil(page_size);
    let entries: Vec<T> = ranked
        .iter()
        .skip(request.offset())
        .take(page_size)
        .cloned()
        .collect();

    LeaderboardPage {
        entries,
        page: request.page(),
        page_size: request.page_size(),
        total_users,
        total_pages,
    }
}

/// A user's place on the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStanding {
    pub position: usize,
    pub is_tied: bool,
    pub total_users: usize,
    pub points: u64,
    pub status: Status,
}

/// Finds `user_id` in a ranked list.
#[must_use]
pub fn standing_for(ranked: &[RankedEntry], user_id: &UserId) -> Option<UserStanding> {
    ranked
        .iter()
        .find(|entry| &entry.user_id == user_id)
        .map(|entry| UserStanding {
            position: entry.position,
            is_tied: entry.is_tied,
            total_users: ranked.len(),
            points: entry.points,
            status: derive_status(entry.points),
        })
}
