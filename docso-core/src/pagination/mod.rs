//! Paginated listings
//!
//! A listing (all functions or all types of a package) is rendered ten items
//! per page. Each listing message gets a [`PaginationState`], registered under
//! the message's [`Handle`] in a [`PaginationRegistry`]. Navigation signals
//! arrive later, asynchronously, and move the page within `[1, page limit]`.
//!
//! State goes away in one of two ways: an explicit destroy signal, or idle
//! eviction once nobody has navigated it for
//! [`RegistryConfig::idle_timeout`]. Either way, later signals for that
//! handle report not-found.

mod registry;
mod state;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::docs::DocIndex;

pub use registry::{Navigation, PaginationRegistry, RegistryStats};
pub use state::{page_limit_for, PageSnapshot, PaginationState};

/// Items per page
pub const PAGE_SIZE: usize = 10;

/// How long a listing survives without navigation
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(300);

/// What a listing enumerates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Functions,
    Types,
}

impl ListingKind {
    /// Block title for this listing
    pub fn title(&self) -> &'static str {
        match self {
            ListingKind::Functions => "functions",
            ListingKind::Types => "types",
        }
    }

    /// Number of listable items in `index`
    pub fn count(&self, index: &DocIndex) -> usize {
        match self {
            ListingKind::Functions => index.functions.len(),
            ListingKind::Types => index.types.len(),
        }
    }
}

/// Navigation requested by an external trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Previous,
    Next,
    Destroy,
}

/// Opaque identifier of one paginated result set (usually a message id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

/// Opaque identifier of a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $ty {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(Handle);
string_id!(CallerId);

/// Who may navigate a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerPolicy {
    /// Anyone who can see the listing
    #[default]
    Anyone,
    /// Only the caller who opened it
    OwnerOnly,
}

/// Registry configuration
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Time after the last navigation before a listing is evicted
    pub idle_timeout: Duration,
    /// Who may navigate
    pub owner_policy: OwnerPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            owner_policy: OwnerPolicy::Anyone,
        }
    }
}

impl RegistryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn owner_policy(mut self, policy: OwnerPolicy) -> Self {
        self.owner_policy = policy;
        self
    }
}
