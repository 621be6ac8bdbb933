/// Byte spans and line/column to byte-offset translation.
pub mod location;
/// Dialect and product-mode configuration.
pub mod options;
/// Byte ranges of literal-bearing expressions.
pub mod spans;
/// Thin wrapper around `sqlparser` that keeps statements, tokens and source together.
pub mod sql_parser;
