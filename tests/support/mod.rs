#![allow(dead_code)]

use sqlparam::parser::options::{ParserOptions, ProductMode, SqlDialect};
use sqlparam::rewriter::replace_literals_in_sql;
use sqlparam::LiteralReplacement;

pub(crate) fn external() -> ParserOptions {
    ParserOptions::new(SqlDialect::BigQuery, ProductMode::External)
}

pub(crate) fn rewrite(sql: &str) -> LiteralReplacement {
    replace_literals_in_sql(sql, &external())
        .unwrap_or_else(|e| panic!("failed to rewrite {sql:?}: {e}"))
}

pub(crate) fn rewrite_sql(sql: &str) -> String {
    rewrite(sql).result_sql
}

/// Put every bound literal back in place of its placeholder.
pub(crate) fn restore_literals(replacement: &LiteralReplacement) -> String {
    replacement
        .parameters
        .iter()
        .fold(replacement.result_sql.clone(), |sql, (name, value)| {
            sql.replace(&format!("@{name}"), value)
        })
}
