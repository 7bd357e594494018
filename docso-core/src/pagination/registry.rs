//! Concurrent handle → state table
//!
//! The map lock is only held to look up, insert or remove a slot. Mutating a
//! listing locks that listing's own slot, so navigation on different handles
//! never contends. A slot is marked dead under its own lock before it leaves
//! the map: anyone who fetched the slot just before a destroy or eviction
//! sees not-found once they get the lock, never a stale page.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::docs::DocIndex;
use crate::error::{DocsoError, Result};
use crate::format::Block;
use crate::timing::{SharedClock, SystemClock};

use super::{
    CallerId, Handle, ListingKind, OwnerPolicy, PageSnapshot, PaginationState, RegistryConfig,
    Signal,
};

/// Outcome of a navigation signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The page changed; replace the message content with this block
    Moved(Block),
    /// Already at the boundary; nothing to do
    Unchanged,
    /// The listing is gone; delete its message
    Destroyed,
}

/// Registry statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Listings currently registered
    pub active: usize,
    /// Listings removed by a destroy signal
    pub destroyed: u64,
    /// Listings removed for inactivity
    pub evicted: u64,
}

struct Slot {
    state: PaginationState,
    live: bool,
}

/// Table of live listings
pub struct PaginationRegistry {
    config: RegistryConfig,
    clock: SharedClock,
    slots: RwLock<HashMap<Handle, Arc<Mutex<Slot>>>>,
    destroyed: AtomicU64,
    evicted: AtomicU64,
}

impl std::fmt::Debug for PaginationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationRegistry")
            .field("active", &self.len())
            .field("idle_timeout", &self.config.idle_timeout)
            .field("owner_policy", &self.config.owner_policy)
            .field("clock", &self.clock.name())
            .finish()
    }
}

impl PaginationRegistry {
    /// Create a registry on the system clock
    pub fn new(config: RegistryConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a registry reading time from `clock`
    pub fn with_clock(config: RegistryConfig, clock: SharedClock) -> Self {
        Self {
            config,
            clock,
            slots: RwLock::new(HashMap::new()),
            destroyed: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Fresh state on page 1, stamped with the registry's clock
    ///
    /// Render it, send it, then [`register`](Self::register) it under the
    /// handle of the sent message.
    pub fn open(&self, kind: ListingKind, owner: CallerId, index: Arc<DocIndex>) -> PaginationState {
        PaginationState::new(kind, owner, index, self.clock.now())
    }

    /// Start tracking `state` under `handle`
    pub fn register(&self, handle: Handle, state: PaginationState) {
        debug!(
            handle = %handle,
            kind = state.kind().title(),
            pages = state.page_limit(),
            "listing registered"
        );
        let slot = Arc::new(Mutex::new(Slot { state, live: true }));
        let previous = self.slots.write().insert(handle.clone(), slot);
        if let Some(previous) = previous {
            previous.lock().live = false;
            warn!(handle = %handle, "handle re-registered; previous listing dropped");
        }
    }

    /// Apply a navigation signal from `actor`
    pub fn navigate(&self, handle: &Handle, signal: Signal, actor: &CallerId) -> Result<Navigation> {
        let not_found = || DocsoError::NotFound {
            handle: handle.to_string(),
        };

        let slot = self.slots.read().get(handle).cloned().ok_or_else(not_found)?;
        let mut guard = slot.lock();
        if !guard.live {
            return Err(not_found());
        }

        let now = self.clock.now();
        if self.is_idle(&guard.state, now) {
            guard.live = false;
            drop(guard);
            self.detach(handle, &slot);
            self.evicted.fetch_add(1, Ordering::SeqCst);
            debug!(handle = %handle, "listing expired on access");
            return Err(not_found());
        }

        if self.config.owner_policy == OwnerPolicy::OwnerOnly && guard.state.owner() != actor {
            return Err(DocsoError::NotOwner {
                handle: handle.to_string(),
            });
        }

        let moved = match signal {
            Signal::Next => guard.state.advance(),
            Signal::Previous => guard.state.retreat(),
            Signal::Destroy => {
                guard.live = false;
                drop(guard);
                self.detach(handle, &slot);
                self.destroyed.fetch_add(1, Ordering::SeqCst);
                debug!(handle = %handle, "listing destroyed");
                return Ok(Navigation::Destroyed);
            }
        };

        if !moved {
            return Ok(Navigation::Unchanged);
        }

        guard.state.touch(now);
        debug!(
            handle = %handle,
            page = guard.state.current_page(),
            pages = guard.state.page_limit(),
            "listing navigated"
        );
        Ok(Navigation::Moved(guard.state.render()))
    }

    /// Remove every listing idle past the timeout
    ///
    /// Listings with a navigation in flight are skipped; the lazy check in
    /// [`navigate`](Self::navigate) catches them if they really are stale.
    pub fn evict_idle(&self) -> usize {
        let now = self.clock.now();
        let mut slots = self.slots.write();
        let before = slots.len();

        slots.retain(|handle, slot| {
            let Some(mut guard) = slot.try_lock() else {
                return true;
            };
            if self.is_idle(&guard.state, now) {
                guard.live = false;
                debug!(handle = %handle, "listing evicted");
                false
            } else {
                true
            }
        });

        let evicted = before - slots.len();
        if evicted > 0 {
            self.evicted.fetch_add(evicted as u64, Ordering::SeqCst);
        }
        evicted
    }

    /// Current position of a listing, without counting as activity
    pub fn snapshot(&self, handle: &Handle) -> Option<PageSnapshot> {
        let slot = self.slots.read().get(handle).cloned()?;
        let guard = slot.lock();
        if guard.live {
            Some(guard.state.snapshot())
        } else {
            None
        }
    }

    pub fn contains(&self, handle: &Handle) -> bool {
        self.slots.read().contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            active: self.len(),
            destroyed: self.destroyed.load(Ordering::SeqCst),
            evicted: self.evicted.load(Ordering::SeqCst),
        }
    }

    fn is_idle(&self, state: &PaginationState, now: Instant) -> bool {
        now.saturating_duration_since(state.last_used()) >= self.config.idle_timeout
    }

    /// Drop `handle` from the map if it still points at `slot`
    fn detach(&self, handle: &Handle, slot: &Arc<Mutex<Slot>>) {
        let mut slots = self.slots.write();
        if slots.get(handle).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(handle);
        }
    }
}
