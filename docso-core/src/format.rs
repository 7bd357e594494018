//! Result formatting
//!
//! Renders matched entries into [`Block`]s. Each entry kind has its own
//! template returning a complete string; length bounding happens exactly once,
//! in [`truncate`], after the entries have been concatenated.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::docs::{DocIndex, EntryRef, FunctionEntry, TypeEntry};
use crate::error::DocsoError;
use crate::pagination::ListingKind;

/// Hard limit on a block description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// How much of an over-long description survives truncation
pub const TRIMMED_CHARS: usize = 1950;

/// Appended to a truncated description
pub const TRIM_NOTICE: &str = "\n\n*note: trimmed to fit the 2k character limit*";

/// Shown when an entry carries no comment lines
pub const NO_INFO: &str = "*no information*";

/// Footer of a rendered block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Footer {
    /// Deep link into the package documentation
    Link { url: String },
    /// Page indicator of a listing
    Page { current: usize, limit: usize },
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Footer::Link { url } => f.write_str(url),
            Footer::Page { current, limit } => write!(f, "Page {}/{}", current, limit),
        }
    }
}

/// A structured output block: title, bounded description, optional footer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
}

impl Block {
    /// Build a block; the description is truncated on the way in
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: truncate(description.into()),
            footer: None,
        }
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.footer = Some(Footer::Link { url: url.into() });
        self
    }

    pub fn with_page(mut self, current: usize, limit: usize) -> Self {
        self.footer = Some(Footer::Page { current, limit });
        self
    }

    /// Whether this is an error block
    pub fn is_error(&self) -> bool {
        self.title == ERROR_TITLE
    }
}

const ERROR_TITLE: &str = "Error";

/// Bound `text` to [`MAX_DESCRIPTION_CHARS`]
///
/// Over-long text keeps its first [`TRIMMED_CHARS`] characters followed by
/// [`TRIM_NOTICE`].
pub fn truncate(text: String) -> String {
    if text.chars().count() <= MAX_DESCRIPTION_CHARS {
        return text;
    }

    let cut = text
        .char_indices()
        .nth(TRIMMED_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    let mut trimmed = String::with_capacity(cut + TRIM_NOTICE.len());
    trimmed.push_str(&text[..cut]);
    trimmed.push_str(TRIM_NOTICE);
    trimmed
}

fn first_comment(comments: &[String]) -> &str {
    comments.first().map(String::as_str).unwrap_or(NO_INFO)
}

/// Template for a function or method
pub fn render_function(entry: &FunctionEntry) -> String {
    let mut out = format!("`{}`\n{}\n", entry.signature, first_comment(&entry.comments));
    if let Some(example) = entry.example.as_deref().filter(|e| !e.is_empty()) {
        out.push_str("\nExample:\n```go\n");
        out.push_str(example);
        out.push_str("\n```\n");
    }
    out
}

/// Template for a type
pub fn render_type(entry: &TypeEntry) -> String {
    format!(
        "```go\n{}\n```\n{}\n",
        entry.signature,
        first_comment(&entry.comments)
    )
}

/// Concatenate the templates of all entries, in order
///
/// The result is not truncated; callers wrap it in a [`Block`].
pub fn format_entries<'a>(entries: impl IntoIterator<Item = EntryRef<'a>>) -> String {
    entries
        .into_iter()
        .map(|entry| match entry {
            EntryRef::Function(f) => render_function(f),
            EntryRef::Type(t) => render_type(t),
        })
        .collect()
}

/// Usage block for the lookup command
pub fn help_block(prefix: &str, command: &str) -> Block {
    let p = format!("{}{}", prefix, command);
    Block::new(
        "Docs help!",
        format!(
            "`{p}` shows this message\n\
             `{p} <pkg>` summarises a package\n\
             `{p} <pkg> <name>` looks up a function or type\n\
             `{p} <pkg> <Type.Method>` looks up a method\n\
             `{p} <pkg> <Type*.Write*>` searches methods by pattern (`*`, `?`, `[..]`, `{{a,b}}`)",
        ),
    )
}

/// Usage block for the listing commands
pub fn listing_help_block(prefix: &str, command: &str) -> Block {
    Block::new(
        format!("Help {}", command),
        format!(
            "It seems you didn't have enough arguments, so here's an example!\n\n{}{} strings",
            prefix, command
        ),
    )
}

/// Summary of a package: how many types and functions it documents
pub fn package_block(package: &str, index: &DocIndex) -> Block {
    Block::new(
        format!("Info for {}", package),
        format!(
            "Types: {}\nFunctions: {}",
            index.types.len(),
            index.functions.len()
        ),
    )
    .with_link(index.url.clone())
}

/// User-visible rendition of an error
pub fn error_block(err: &DocsoError) -> Block {
    Block::new(ERROR_TITLE, err.to_string())
}

/// One page of a listing
///
/// `page` is 1-indexed; a `limit` of zero renders the empty listing.
pub fn page_block(kind: ListingKind, index: &DocIndex, page: usize, limit: usize) -> Block {
    if limit == 0 {
        return Block::new(kind.title(), format!("This package has no {}.", kind.title()))
            .with_page(0, 0);
    }

    let start = (page - 1) * crate::pagination::PAGE_SIZE;
    let description = match kind {
        ListingKind::Functions => format_entries(
            index
                .functions
                .iter()
                .skip(start)
                .take(crate::pagination::PAGE_SIZE)
                .map(EntryRef::Function),
        ),
        ListingKind::Types => format_entries(
            index
                .types
                .iter()
                .skip(start)
                .take(crate::pagination::PAGE_SIZE)
                .map(EntryRef::Type),
        ),
    };

    Block::new(kind.title(), description).with_page(page, limit)
}
