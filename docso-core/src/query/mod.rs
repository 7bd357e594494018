//! Query parsing and resolution
//!
//! A lookup goes through two steps:
//!
//! 1. [`Query::parse`] turns the command arguments into a typed query shape.
//! 2. [`resolve`] runs that query against a [`DocIndex`](crate::docs::DocIndex).

mod parser;
mod resolver;

pub use parser::{Query, MAX_ARGS};
pub use resolver::{resolve, Lookup, Resolution};
