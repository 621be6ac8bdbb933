//! Replacement of literal constants by named query parameters.
//!
//! Two statements that differ only in their constants rewrite to the same
//! parameterized text, which makes the output usable as a cache key for
//! query plans.

/// Collection of literal occurrences from parsed statements.
pub mod collector;
/// Parameter name generation.
pub mod namer;
/// Output maps of a rewrite.
pub mod replacement;
/// Splicing of placeholders into the source text.
pub mod splicer;

use crate::error::Error;
use crate::parser::options::ParserOptions;
use crate::parser::sql_parser::{parse_sql, ParsedSql};
use crate::rewriter::collector::collect_literals;
use crate::rewriter::replacement::LiteralReplacement;
use crate::rewriter::splicer::splice_parameters;

/// Replace the literals of already parsed statements by `@name` parameters.
///
/// Literals used as table hint values are kept verbatim. Either the whole
/// replacement is produced or an error is returned.
pub fn replace_literals_by_parameters(parsed: &ParsedSql<'_>) -> Result<LiteralReplacement, Error> {
    let literals = collect_literals(parsed);
    splice_parameters(parsed.sql(), &literals, parsed.options().product_mode)
}

/// Parse `sql` and replace its literals by `@name` parameters.
///
/// A parse failure is reported as [`Error::Parse`] and no rewrite is
/// attempted.
pub fn replace_literals_in_sql(sql: &str, options: &ParserOptions) -> Result<LiteralReplacement, Error> {
    let parsed = parse_sql(sql, options)?;
    replace_literals_by_parameters(&parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::options::{ProductMode, SqlDialect};

    fn external() -> ParserOptions {
        ParserOptions::new(SqlDialect::BigQuery, ProductMode::External)
    }

    #[test]
    fn rewrites_where_clause_constants() {
        let out = replace_literals_in_sql("SELECT a FROM t WHERE b = 'x' AND c = 1", &external())
            .unwrap();
        assert_eq!(out.result_sql, "SELECT a FROM t WHERE b = @_p0_STRING AND c = @_p1_INT64");
        assert_eq!(out.parameters["_p0_STRING"], "'x'");
        assert_eq!(out.parameters["_p1_INT64"], "1");
        assert_eq!(out.literal_map.len(), 2);
    }

    #[test]
    fn parse_failure_produces_no_output() {
        let err = replace_literals_in_sql("SELECT FROM WHERE", &external()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn every_mapped_name_is_bound() {
        let out = replace_literals_in_sql(
            "SELECT [1, 2], STRUCT(1 AS a), (TRUE, 'b'), 2.5",
            &external(),
        )
        .unwrap();
        for name in out.literal_map.values() {
            assert!(out.parameters.contains_key(name), "{name} should be bound");
        }
        assert_eq!(
            out.result_sql,
            "SELECT @_p0_ARRAY, @_p1_STRUCT, @_p2_STRUCT, @_p3_FLOAT64"
        );
    }
}
