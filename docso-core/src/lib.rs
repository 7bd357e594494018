//! # Docso Core - documentation lookup engine
//!
//! Docso answers free-text queries against a documentation index and lets
//! callers browse long listings page by page:
//!
//! - **Query resolution**: exact, case-insensitive symbol lookup and wildcard
//!   method search over a [`DocIndex`]
//! - **Formatting**: length-bounded output [`Block`]s with deterministic
//!   truncation
//! - **Pagination**: a concurrency-safe registry of listing state driven by
//!   navigation signals, with idle eviction
//!
//! Fetching documentation, delivering events and sending messages are left to
//! the embedding application.
//!
//! ## Example
//!
//! ```rust
//! use docso_core::{resolve, DocIndex, FunctionEntry, Query};
//!
//! let index = DocIndex::new("https://pkg.go.dev/strings").with_function(
//!     FunctionEntry::method("Builder", "WriteString", "func (b *Builder) WriteString(s string) (int, error)")
//!         .with_comment("WriteString appends the contents of s to b's buffer."),
//! );
//!
//! let query = Query::parse_str("strings builder.writestring");
//! let block = resolve(&index, &query).unwrap().into_block("!", "doc");
//!
//! assert_eq!(block.title, "strings: func(Builder) WriteString");
//! assert_eq!(
//!     block.footer.unwrap().to_string(),
//!     "https://pkg.go.dev/strings#Builder.WriteString"
//! );
//! ```

pub mod docs;
pub mod error;
pub mod format;
pub mod glob;
pub mod pagination;
pub mod query;
pub mod timing;

// Re-export main types
pub use docs::{DocIndex, EntryRef, FnKind, FunctionEntry, TypeEntry};
pub use error::{DocsoError, ErrorCategory, Result};
pub use format::{Block, Footer};
pub use glob::{CompileError, Matcher};
pub use pagination::{
    CallerId, Handle, ListingKind, Navigation, OwnerPolicy, PaginationRegistry, PaginationState,
    RegistryConfig, Signal, PAGE_SIZE,
};
pub use query::{resolve, Lookup, Query, Resolution};
pub use timing::{Clock, ManualClock, SharedClock, SystemClock};
