//! Paging and delete planning for message purges.
//!
//! History is fetched newest first in pages of at most [`PAGE_SIZE`]. Each page is
//! split by age: recent messages go through one bulk delete (or a single delete
//! when only one is recent), older ones are deleted one by one.

use crate::utils::is_bulk_deletable;

/// Largest page the message history and bulk delete endpoints accept.
pub const PAGE_SIZE: u64 = 100;

/// Tracks how many messages a purge may still fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    remaining: Option<u64>,
    exhausted: bool,
}

impl PageCursor {
    /// Starts a purge of at most `limit` messages, or of everything when `None`.
    #[must_use]
    pub const fn new(limit: Option<u64>) -> Self {
        Self {
            remaining: limit,
            exhausted: false,
        }
    }

    /// Size of the next page to request, `None` once the purge is finished.
    #[must_use]
    pub fn next_page(&self) -> Option<u64> {
        if self.exhausted {
            return None;
        }
        match self.remaining {
            Some(0) => None,
            Some(n) => Some(n.min(PAGE_SIZE)),
            None => Some(PAGE_SIZE),
        }
    }

    /// Records a page that returned `fetched` of the `requested` messages.
    ///
    /// A short page means the channel has no older messages.
    pub fn record(&mut self, requested: u64, fetched: u64) {
        if let Some(n) = self.remaining.as_mut() {
            *n = n.saturating_sub(fetched);
        }
        if fetched < requested {
            self.exhausted = true;
        }
    }
}

/// How one fetched page is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletePlan<T> {
    /// Recent messages removed with one bulk request; never a single message.
    pub bulk: Vec<T>,
    /// The only recent message, when exactly one is recent.
    pub single: Option<T>,
    /// Messages too old for bulk deletion.
    pub stale: Vec<T>,
}

impl<T> DeletePlan<T> {
    /// Number of messages the plan deletes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bulk.len() + usize::from(self.single.is_some()) + self.stale.len()
    }

    /// Whether the plan deletes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Splits `(id, created_unix)` pairs by bulk-delete eligibility at `now_unix`.
///
/// Page order is preserved within each group.
#[must_use]
pub fn plan_deletes<T: Copy>(messages: &[(T, i64)], now_unix: i64) -> DeletePlan<T> {
    let (recent, stale): (Vec<(T, i64)>, Vec<(T, i64)>) = messages
        .iter()
        .copied()
        .partition(|&(_, created)| is_bulk_deletable(created, now_unix));

    let mut recent: Vec<T> = recent.into_iter().map(|(id, _)| id).collect();
    let single = if recent.len() == 1 { recent.pop() } else { None };

    DeletePlan {
        bulk: recent,
        single,
        stale: stale.into_iter().map(|(id, _)| id).collect(),
    }
}
