//! Documentation index model
//!
//! A [`DocIndex`] is a read-only snapshot of one package's documentation as
//! produced by an index provider. The engine never mutates it; listings share
//! it through an `Arc` instead of copying.

use serde::{Deserialize, Serialize};

/// Whether a function is free-standing or bound to a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FnKind {
    #[default]
    Plain,
    Method,
}

/// A documented function or method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub name: String,

    #[serde(default)]
    pub kind: FnKind,

    /// Owning type name; empty unless `kind` is `Method`
    #[serde(default)]
    pub method_of: String,

    pub signature: String,

    #[serde(default)]
    pub comments: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl FunctionEntry {
    /// A plain function
    pub fn plain(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FnKind::Plain,
            method_of: String::new(),
            signature: signature.into(),
            comments: Vec::new(),
            example: None,
        }
    }

    /// A method bound to `method_of`
    pub fn method(
        method_of: impl Into<String>,
        name: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FnKind::Method,
            method_of: method_of.into(),
            signature: signature.into(),
            comments: Vec::new(),
            example: None,
        }
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example = Some(example.into());
        self
    }

    pub fn is_method(&self) -> bool {
        self.kind == FnKind::Method
    }
}

/// A documented type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub signature: String,

    #[serde(default)]
    pub comments: Vec<String>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            signature: signature.into(),
            comments: Vec::new(),
        }
    }

    pub fn with_comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }
}

/// Documentation snapshot for one package
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocIndex {
    /// Canonical page URL, used for deep links
    pub url: String,

    #[serde(default)]
    pub types: Vec<TypeEntry>,

    #[serde(default)]
    pub functions: Vec<FunctionEntry>,
}

impl DocIndex {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            types: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn with_type(mut self, entry: TypeEntry) -> Self {
        self.types.push(entry);
        self
    }

    pub fn with_function(mut self, entry: FunctionEntry) -> Self {
        self.functions.push(entry);
        self
    }

    /// Parse an index from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Deep link to a symbol on the package page
    pub fn anchor(&self, fragment: &str) -> String {
        format!("{}#{}", self.url, fragment)
    }
}

/// A matched entry, borrowed from the index it came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryRef<'a> {
    Function(&'a FunctionEntry),
    Type(&'a TypeEntry),
}
