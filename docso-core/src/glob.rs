//! Wildcard pattern matching
//!
//! Compiles shell-style globs into anchored, case-insensitive predicates.
//!
//! | token          | meaning                              |
//! |----------------|--------------------------------------|
//! | `*`            | zero or more characters              |
//! | `?`            | exactly one character                |
//! | `[abc]` `[a-z]`| one character from the class         |
//! | `[!a-z]`       | one character not in the class       |
//! | `{a,b}`        | either branch (branches may be globs)|
//! | `\x`           | literal `x`                          |
//!
//! ```rust
//! use docso_core::glob::Matcher;
//!
//! let m = Matcher::compile("Write*").unwrap();
//! assert!(m.matches("WriteString"));
//! assert!(m.matches("writebyte"));
//! assert!(!m.matches("xWriteString"));
//! ```

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Characters that turn a plain name into a pattern
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Returns true if `text` contains any wildcard metacharacter
pub fn is_glob(text: &str) -> bool {
    text.contains(GLOB_META)
}

/// Malformed wildcard syntax
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at offset {offset} in `{pattern}`")]
pub struct CompileError {
    /// The pattern as the caller typed it
    pub pattern: String,
    /// Character offset of the offending token
    pub offset: usize,
    /// What is wrong with it
    pub reason: String,
}

impl CompileError {
    fn new(pattern: &str, offset: usize, reason: impl Into<String>) -> Self {
        Self {
            pattern: pattern.to_string(),
            offset,
            reason: reason.into(),
        }
    }
}

/// A compiled wildcard predicate
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: String,
    regex: Regex,
}

impl Matcher {
    /// Compile a glob pattern
    pub fn compile(pattern: &str) -> Result<Self, CompileError> {
        let body = translate(pattern)?;
        let regex = RegexBuilder::new(&format!("^(?:{})$", body))
            .case_insensitive(true)
            .build()
            .map_err(|e| CompileError::new(pattern, 0, e.to_string()))?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Test a candidate against the whole pattern
    pub fn matches(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }

    /// The source pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

/// Translate glob syntax to a regex body (without anchors)
fn translate(pattern: &str) -> Result<String, CompileError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    // offsets of currently open `{`
    let mut groups: Vec<usize> = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '*' => {
                while i + 1 < chars.len() && chars[i + 1] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    return Err(CompileError::new(pattern, i, "trailing escape character"));
                };
                push_literal(&mut out, next);
                i += 1;
            }
            '[' => {
                i = translate_class(pattern, &chars, i, &mut out)?;
            }
            ']' => return Err(CompileError::new(pattern, i, "unmatched `]`")),
            '{' => {
                groups.push(i);
                out.push_str("(?:");
            }
            ',' if !groups.is_empty() => out.push('|'),
            '}' => {
                if groups.pop().is_none() {
                    return Err(CompileError::new(pattern, i, "unmatched `}`"));
                }
                out.push(')');
            }
            _ => push_literal(&mut out, c),
        }
        i += 1;
    }

    if let Some(open) = groups.pop() {
        return Err(CompileError::new(pattern, open, "unclosed `{`"));
    }

    Ok(out)
}

/// Translate a `[...]` class starting at `start`; returns the index of the closing `]`
fn translate_class(
    pattern: &str,
    chars: &[char],
    start: usize,
    out: &mut String,
) -> Result<usize, CompileError> {
    let mut i = start + 1;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    let mut members: Vec<char> = Vec::new();
    // a `]` right after the opening bracket is a literal member
    if chars.get(i) == Some(&']') {
        members.push(']');
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        members.push(chars[i]);
        i += 1;
    }

    if i >= chars.len() {
        return Err(CompileError::new(pattern, start, "unclosed character class"));
    }
    if members.is_empty() {
        return Err(CompileError::new(pattern, start, "empty character class"));
    }

    out.push('[');
    if negated {
        out.push('^');
    }
    let last = members.len() - 1;
    for (idx, &m) in members.iter().enumerate() {
        if m == '-' && idx != 0 && idx != last {
            out.push('-');
        } else {
            out.push_str(&regex::escape(&m.to_string()));
        }
    }
    out.push(']');

    Ok(i)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
