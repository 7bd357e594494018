//! Query resolution against a [`DocIndex`]
//!
//! Resolution is a pure function of the index and the parsed query. Name
//! comparison is always case-insensitive; when several entries share a name
//! they are all returned in declaration order, and titles and anchors use the
//! capitalisation stored in the index rather than what the caller typed.

use tracing::debug;

use crate::docs::{DocIndex, EntryRef, FunctionEntry};
use crate::error::{DocsoError, Result};
use crate::format::{self, Block};
use crate::glob::Matcher;

use super::parser::{Query, MAX_ARGS};

/// Matched entries plus how to present them
#[derive(Debug, Clone)]
pub struct Lookup<'a> {
    pub title: String,
    pub entries: Vec<EntryRef<'a>>,
    /// Deep link for the footer
    pub link: String,
}

impl Lookup<'_> {
    pub fn into_block(self) -> Block {
        Block::new(self.title, format::format_entries(self.entries)).with_link(self.link)
    }
}

/// Outcome of resolving a query
#[derive(Debug, Clone)]
pub enum Resolution<'a> {
    /// Usage was requested
    Help,
    /// Type and function counts of a package
    Summary { package: String, index: &'a DocIndex },
    /// One or more entries matched
    Matches(Lookup<'a>),
}

impl Resolution<'_> {
    /// Render for output; `prefix` and `command` are only used by the help text
    pub fn into_block(self, prefix: &str, command: &str) -> Block {
        match self {
            Resolution::Help => format::help_block(prefix, command),
            Resolution::Summary { package, index } => format::package_block(&package, index),
            Resolution::Matches(lookup) => lookup.into_block(),
        }
    }
}

/// Resolve `query` against `index`
///
/// `Help` never looks at the index, so callers may pass an empty one.
pub fn resolve<'a>(index: &'a DocIndex, query: &Query) -> Result<Resolution<'a>> {
    let resolution = match query {
        Query::Help => Ok(Resolution::Help),
        Query::TooMany { given } => Err(DocsoError::TooManyArguments {
            given: *given,
            max: MAX_ARGS,
        }),
        Query::PackageOnly { package } => Ok(Resolution::Summary {
            package: package.clone(),
            index,
        }),
        Query::Symbol { package, name } => resolve_symbol(index, package, name),
        Query::MethodExact {
            package,
            type_name,
            method,
        } => resolve_method(index, package, type_name, method),
        Query::MethodGlob {
            package,
            type_pattern,
            method_pattern,
        } => resolve_method_glob(index, package, type_pattern, method_pattern),
    }?;

    if let Resolution::Matches(lookup) = &resolution {
        debug!(title = %lookup.title, matches = lookup.entries.len(), "query resolved");
    }
    Ok(resolution)
}

/// Case-insensitive name comparison over the full Unicode range
fn names_match(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

fn resolve_symbol<'a>(index: &'a DocIndex, package: &str, name: &str) -> Result<Resolution<'a>> {
    let functions: Vec<&FunctionEntry> = index
        .functions
        .iter()
        .filter(|f| !f.is_method() && names_match(&f.name, name))
        .collect();

    if let Some(first) = functions.first() {
        let canonical = first.name.clone();
        return Ok(Resolution::Matches(Lookup {
            title: format!("{}: {}", package, canonical),
            link: index.anchor(&canonical),
            entries: functions.into_iter().map(EntryRef::Function).collect(),
        }));
    }

    let types: Vec<EntryRef<'a>> = index
        .types
        .iter()
        .filter(|t| names_match(&t.name, name))
        .map(EntryRef::Type)
        .collect();

    let Some(EntryRef::Type(first)) = types.first() else {
        return Err(DocsoError::NoMatch {
            subject: format!("type or function `{}`", name),
            package: package.to_string(),
        });
    };

    let canonical = first.name.clone();
    Ok(Resolution::Matches(Lookup {
        title: format!("{}: {}", package, canonical),
        link: index.anchor(&canonical),
        entries: types,
    }))
}

fn resolve_method<'a>(
    index: &'a DocIndex,
    package: &str,
    type_name: &str,
    method: &str,
) -> Result<Resolution<'a>> {
    let matches: Vec<&FunctionEntry> = index
        .functions
        .iter()
        .filter(|f| {
            f.is_method()
                && names_match(&f.name, method)
                && names_match(&f.method_of, type_name)
        })
        .collect();

    let Some(first) = matches.first() else {
        return Err(DocsoError::NoMatch {
            subject: format!("method `func({}) {}`", type_name, method),
            package: package.to_string(),
        });
    };

    let (owner, name) = (first.method_of.clone(), first.name.clone());
    Ok(Resolution::Matches(Lookup {
        title: format!("{}: func({}) {}", package, owner, name),
        link: index.anchor(&format!("{}.{}", owner, name)),
        entries: matches.into_iter().map(EntryRef::Function).collect(),
    }))
}

fn resolve_method_glob<'a>(
    index: &'a DocIndex,
    package: &str,
    type_pattern: &str,
    method_pattern: &str,
) -> Result<Resolution<'a>> {
    let no_match = || DocsoError::NoMatch {
        subject: format!(
            "methods matching the expression `{}.{}`",
            type_pattern, method_pattern
        ),
        package: package.to_string(),
    };

    // no point compiling patterns for a package with nothing to match
    if index.functions.is_empty() || index.types.is_empty() {
        return Err(no_match());
    }

    let owner = Matcher::compile(type_pattern)?;
    let name = Matcher::compile(method_pattern)?;

    let entries: Vec<EntryRef<'a>> = index
        .functions
        .iter()
        .filter(|f| f.is_method() && owner.matches(&f.method_of) && name.matches(&f.name))
        .map(EntryRef::Function)
        .collect();

    debug!(
        owner = owner.pattern(),
        method = name.pattern(),
        matches = entries.len(),
        "method patterns applied"
    );
    if entries.is_empty() {
        return Err(no_match());
    }

    Ok(Resolution::Matches(Lookup {
        title: "Matches".to_string(),
        link: index.url.clone(),
        entries,
    }))
}
