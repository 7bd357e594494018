//! Query grammar
//!
//! ```text
//! (nothing)                -> Help
//! <pkg>                    -> PackageOnly
//! <pkg> <name>             -> Symbol
//! <pkg> <Type.Method>      -> MethodExact, or MethodGlob if either side is a glob
//! <pkg> <x> <more...>      -> TooMany
//! ```

use serde::{Deserialize, Serialize};

use crate::glob::{is_glob, CompileError, Matcher};

/// The most arguments any query shape accepts
pub const MAX_ARGS: usize = 2;

/// A parsed lookup request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Query {
    /// No arguments: show usage
    Help,
    /// Summarise a package
    PackageOnly { package: String },
    /// Function, falling back to type, by exact name
    Symbol { package: String, name: String },
    /// Method by exact owning type and name
    MethodExact {
        package: String,
        type_name: String,
        method: String,
    },
    /// Methods whose owning type and name match the patterns
    MethodGlob {
        package: String,
        type_pattern: String,
        method_pattern: String,
    },
    /// More arguments than any shape accepts
    TooMany { given: usize },
}

impl Query {
    /// Parse the arguments following the command word
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        match args {
            [] => Query::Help,
            [package] => Query::PackageOnly {
                package: package.as_ref().to_string(),
            },
            [package, symbol] => Self::parse_symbol(package.as_ref(), symbol.as_ref()),
            _ => Query::TooMany { given: args.len() },
        }
    }

    /// Split a whitespace-separated argument string and parse it
    pub fn parse_str(args: &str) -> Self {
        let tokens: Vec<&str> = args.split_whitespace().collect();
        Self::parse(&tokens)
    }

    fn parse_symbol(package: &str, symbol: &str) -> Self {
        let package = package.to_string();

        let Some((type_part, method_part)) = symbol.split_once('.') else {
            return Query::Symbol {
                package,
                name: symbol.to_string(),
            };
        };

        if is_glob(type_part) || is_glob(method_part) {
            Query::MethodGlob {
                package,
                type_pattern: type_part.to_string(),
                method_pattern: method_part.to_string(),
            }
        } else {
            Query::MethodExact {
                package,
                type_name: type_part.to_string(),
                method: method_part.to_string(),
            }
        }
    }

    /// The package this query needs an index for, if any
    pub fn package(&self) -> Option<&str> {
        match self {
            Query::PackageOnly { package }
            | Query::Symbol { package, .. }
            | Query::MethodExact { package, .. }
            | Query::MethodGlob { package, .. } => Some(package),
            Query::Help | Query::TooMany { .. } => None,
        }
    }

    /// Reject malformed wildcard patterns before any index is fetched
    ///
    /// Only `MethodGlob` carries patterns; every other shape passes.
    pub fn check_patterns(&self) -> Result<(), CompileError> {
        if let Query::MethodGlob {
            type_pattern,
            method_pattern,
            ..
        } = self
        {
            Matcher::compile(type_pattern)?;
            Matcher::compile(method_pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_and_package() {
        assert_eq!(Query::parse_str(""), Query::Help);
        assert_eq!(
            Query::parse_str("strings"),
            Query::PackageOnly {
                package: "strings".to_string()
            }
        );
    }

    #[test]
    fn test_symbol() {
        assert_eq!(
            Query::parse_str("strings Contains"),
            Query::Symbol {
                package: "strings".to_string(),
                name: "Contains".to_string()
            }
        );
    }

    #[test]
    fn test_method_splits_on_first_dot() {
        assert_eq!(
            Query::parse_str("strings Builder.WriteString"),
            Query::MethodExact {
                package: "strings".to_string(),
                type_name: "Builder".to_string(),
                method: "WriteString".to_string()
            }
        );
        assert_eq!(
            Query::parse_str("p A.b.c"),
            Query::MethodExact {
                package: "p".to_string(),
                type_name: "A".to_string(),
                method: "b.c".to_string()
            }
        );
    }

    #[test]
    fn test_glob_on_either_side() {
        assert!(matches!(
            Query::parse_str("strings *.Write*"),
            Query::MethodGlob { .. }
        ));
        assert!(matches!(
            Query::parse_str("strings Builder.Write?"),
            Query::MethodGlob { .. }
        ));
        assert!(matches!(
            Query::parse_str("strings B*.Len"),
            Query::MethodGlob { .. }
        ));
    }

    #[test]
    fn test_classes_and_braces_route_to_glob() {
        // an unbalanced class still routes here so it reports a pattern error
        for args in [
            "strings Builder.Write[",
            "strings Builder.Write[SB]*",
            "strings {Builder,Reader}.Len",
        ] {
            assert!(matches!(Query::parse_str(args), Query::MethodGlob { .. }), "{}", args);
        }
    }

    #[test]
    fn test_check_patterns() {
        assert!(Query::parse_str("strings *.Write*").check_patterns().is_ok());
        assert!(Query::parse_str("strings Builder.Len").check_patterns().is_ok());
        assert!(Query::parse_str("").check_patterns().is_ok());

        let err = Query::parse_str("strings Builder.Write[")
            .check_patterns()
            .unwrap_err();
        assert_eq!(err.pattern, "Write[");

        let err = Query::parse_str("strings B{uilder.Len")
            .check_patterns()
            .unwrap_err();
        assert_eq!(err.pattern, "B{uilder");
    }

    #[test]
    fn test_too_many_regardless_of_content() {
        assert_eq!(Query::parse_str("a b c"), Query::TooMany { given: 3 });
        assert_eq!(Query::parse_str("strings Builder.Len extra more"), Query::TooMany { given: 4 });
    }

    #[test]
    fn test_package_accessor() {
        assert_eq!(Query::parse_str("").package(), None);
        assert_eq!(Query::parse_str("a b c").package(), None);
        assert_eq!(Query::parse_str("io Reader").package(), Some("io"));
    }
}
