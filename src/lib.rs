//! Replace literal constants in SQL statements with named query parameters.
#![warn(missing_docs)]

/// Literal classification: node kinds, constant-expression checks, and type names.
pub mod classifier;
/// Error type shared by parsing and rewriting.
pub mod error;
/// Rendering and writing of rewrite results.
pub mod output;
/// SQL parsing, configuration, and parse-location handling.
pub mod parser;
/// Literal collection, parameter naming, and text splicing.
pub mod rewriter;

pub use error::Error;
pub use parser::options::{ParserOptions, ProductMode, SqlDialect};
pub use rewriter::replacement::LiteralReplacement;
pub use rewriter::{replace_literals_by_parameters, replace_literals_in_sql};
