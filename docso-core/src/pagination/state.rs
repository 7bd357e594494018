//! Browsing state of one listing

use std::sync::Arc;
use std::time::Instant;

use crate::docs::DocIndex;
use crate::format::{self, Block};

use super::{CallerId, ListingKind, PAGE_SIZE};

/// Number of pages needed for `count` items
pub fn page_limit_for(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Mutable browsing state of one listing
///
/// `current_page` stays within `[1, page_limit]`. With an empty collection
/// `page_limit` is 0 and the state never moves.
#[derive(Debug, Clone)]
pub struct PaginationState {
    kind: ListingKind,
    current_page: usize,
    page_limit: usize,
    owner: CallerId,
    index: Arc<DocIndex>,
    last_used: Instant,
}

impl PaginationState {
    /// State positioned on the first page
    pub fn new(kind: ListingKind, owner: CallerId, index: Arc<DocIndex>, now: Instant) -> Self {
        let page_limit = page_limit_for(kind.count(&index));
        Self {
            kind,
            current_page: 1,
            page_limit,
            owner,
            index,
            last_used: now,
        }
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_limit(&self) -> usize {
        self.page_limit
    }

    pub fn owner(&self) -> &CallerId {
        &self.owner
    }

    pub fn index(&self) -> &Arc<DocIndex> {
        &self.index
    }

    pub fn last_used(&self) -> Instant {
        self.last_used
    }

    /// Move forward one page; false if already on the last one
    pub fn advance(&mut self) -> bool {
        if self.current_page >= self.page_limit {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Move back one page; false if already on the first one
    pub fn retreat(&mut self) -> bool {
        if self.page_limit == 0 || self.current_page <= 1 {
            return false;
        }
        self.current_page -= 1;
        true
    }

    pub(crate) fn touch(&mut self, now: Instant) {
        self.last_used = now;
    }

    /// Render the current page
    pub fn render(&self) -> Block {
        format::page_block(self.kind, &self.index, self.current_page, self.page_limit)
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            kind: self.kind,
            current_page: self.current_page,
            page_limit: self.page_limit,
            owner: self.owner.clone(),
        }
    }
}

/// Read-only view of a listing's position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub kind: ListingKind,
    pub current_page: usize,
    pub page_limit: usize,
    pub owner: CallerId,
}
