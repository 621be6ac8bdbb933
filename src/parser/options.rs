use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sqlparser::dialect::{
    AnsiDialect, BigQueryDialect, ClickHouseDialect, Dialect, DuckDbDialect, GenericDialect,
    HiveDialect, MsSqlDialect, MySqlDialect, PostgreSqlDialect, SQLiteDialect, SnowflakeDialect,
};

use crate::error::Error;

/// SQL dialect handed to the parser and tokenizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SqlDialect {
    /// `BigQuery` standard SQL: `STRUCT`, `ARRAY<T>[…]`, typed date literals.
    #[default]
    #[value(name = "bigquery")]
    BigQuery,
    /// Permissive dialect accepting most syntax.
    Generic,
    /// `PostgreSQL`.
    #[value(name = "postgresql", alias = "postgres")]
    #[serde(alias = "postgres")]
    PostgreSql,
    /// `MySQL`.
    #[value(name = "mysql")]
    MySql,
    /// ANSI SQL.
    Ansi,
    /// Snowflake.
    Snowflake,
    /// `DuckDB`.
    #[value(name = "duckdb")]
    DuckDb,
    /// Microsoft SQL Server.
    #[value(name = "mssql")]
    MsSql,
    /// `SQLite`.
    #[value(name = "sqlite")]
    Sqlite,
    /// Apache Hive.
    Hive,
    /// `ClickHouse`.
    #[value(name = "clickhouse")]
    ClickHouse,
}

impl SqlDialect {
    /// Build the sqlparser dialect object.
    pub fn dialect(self) -> Box<dyn Dialect> {
        match self {
            SqlDialect::BigQuery => Box::new(BigQueryDialect {}),
            SqlDialect::Generic => Box::new(GenericDialect {}),
            SqlDialect::PostgreSql => Box::new(PostgreSqlDialect {}),
            SqlDialect::MySql => Box::new(MySqlDialect {}),
            SqlDialect::Ansi => Box::new(AnsiDialect {}),
            SqlDialect::Snowflake => Box::new(SnowflakeDialect {}),
            SqlDialect::DuckDb => Box::new(DuckDbDialect {}),
            SqlDialect::MsSql => Box::new(MsSqlDialect {}),
            SqlDialect::Sqlite => Box::new(SQLiteDialect {}),
            SqlDialect::Hive => Box::new(HiveDialect {}),
            SqlDialect::ClickHouse => Box::new(ClickHouseDialect {}),
        }
    }
}

/// Naming convention for type names embedded in parameter names.
///
/// Mirrors the split between engine-internal type names (`DOUBLE`) and the
/// names exposed to end users (`FLOAT64`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProductMode {
    /// Engine-internal type names.
    #[default]
    Internal,
    /// User-facing type names.
    External,
}

impl fmt::Display for ProductMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductMode::Internal => write!(f, "internal"),
            ProductMode::External => write!(f, "external"),
        }
    }
}

/// Configuration that must stay fixed between parsing a statement and
/// rewriting it, since parse locations are only valid for the exact source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// Dialect used to tokenize and parse the input.
    pub dialect: SqlDialect,
    /// Type naming convention for generated parameter names.
    pub product_mode: ProductMode,
}

impl ParserOptions {
    /// Create options for the given dialect and product mode.
    pub fn new(dialect: SqlDialect, product_mode: ProductMode) -> Self {
        Self {
            dialect,
            product_mode,
        }
    }

    /// Load options from a JSON document such as
    /// `{"dialect": "bigquery", "product_mode": "external"}`.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Options(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_library_convention() {
        let options = ParserOptions::default();
        assert_eq!(options.dialect, SqlDialect::BigQuery);
        assert_eq!(options.product_mode, ProductMode::Internal);
    }

    #[test]
    fn from_json_fills_missing_fields_with_defaults() {
        let options = ParserOptions::from_json(r#"{"product_mode": "external"}"#)
            .expect("partial options should load");
        assert_eq!(options.dialect, SqlDialect::BigQuery);
        assert_eq!(options.product_mode, ProductMode::External);

        let options = ParserOptions::from_json(r#"{"dialect": "postgres"}"#)
            .expect("dialect alias should load");
        assert_eq!(options.dialect, SqlDialect::PostgreSql);
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let err = ParserOptions::from_json(r#"{"dialekt": "mysql"}"#)
            .expect_err("unknown field should be rejected");
        assert!(matches!(err, Error::Options(_)));
    }
}
