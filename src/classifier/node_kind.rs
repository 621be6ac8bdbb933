use serde::Serialize;
use sqlparser::ast::{DataType, Expr, Value};

/// Date and time flavours of a typed literal such as `DATE '2024-01-01'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DateTimeKind {
    /// `DATE '…'`
    Date,
    /// `TIME '…'`
    Time,
    /// `DATETIME '…'`
    Datetime,
    /// `TIMESTAMP '…'`
    Timestamp,
}

/// Syntactic kind of an expression node, as far as literal handling cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    /// Quoted, raw, national, escaped, unicode or dollar-quoted string.
    StringLiteral,
    /// Byte string (`b'…'`) or hex string.
    BytesLiteral,
    /// Integer number.
    IntLiteral,
    /// Number with a fraction or exponent.
    FloatLiteral,
    /// `NUMERIC '…'` or `DECIMAL '…'`.
    NumericLiteral,
    /// Date or time typed string.
    DateOrTimeLiteral(DateTimeKind),
    /// `TRUE` or `FALSE`.
    BooleanLiteral,
    /// `[…]`, `ARRAY[…]` or `ARRAY<T>[…]`.
    ArrayConstructor,
    /// `STRUCT(…)` or `STRUCT<…>(…)`.
    StructConstructorWithKeyword,
    /// Bare parenthesized tuple `(a, b, …)`.
    StructConstructorWithParens,
    /// Anything else, including `NULL` and query placeholders.
    Other,
}

impl NodeKind {
    /// True for the kinds the literal collector looks at.
    pub fn is_literal_bearing(self) -> bool {
        !matches!(self, NodeKind::Other)
    }
}

/// Classify an expression node.
pub fn node_kind(expr: &Expr) -> NodeKind {
    match expr {
        Expr::Value(value) => value_kind(&value.value),
        Expr::TypedString(typed) => typed_string_kind(&typed.data_type),
        Expr::Array(_) => NodeKind::ArrayConstructor,
        Expr::Struct { .. } => NodeKind::StructConstructorWithKeyword,
        Expr::Tuple(_) => NodeKind::StructConstructorWithParens,
        _ => NodeKind::Other,
    }
}

fn value_kind(value: &Value) -> NodeKind {
    match value {
        Value::SingleQuotedString(_)
        | Value::DoubleQuotedString(_)
        | Value::TripleSingleQuotedString(_)
        | Value::TripleDoubleQuotedString(_)
        | Value::SingleQuotedRawStringLiteral(_)
        | Value::DoubleQuotedRawStringLiteral(_)
        | Value::TripleSingleQuotedRawStringLiteral(_)
        | Value::TripleDoubleQuotedRawStringLiteral(_)
        | Value::NationalStringLiteral(_)
        | Value::EscapedStringLiteral(_)
        | Value::UnicodeStringLiteral(_)
        | Value::DollarQuotedString(_) => NodeKind::StringLiteral,
        Value::SingleQuotedByteStringLiteral(_)
        | Value::DoubleQuotedByteStringLiteral(_)
        | Value::TripleSingleQuotedByteStringLiteral(_)
        | Value::TripleDoubleQuotedByteStringLiteral(_)
        | Value::HexStringLiteral(_) => NodeKind::BytesLiteral,
        Value::Number(number, _) => number_kind(&number.to_string()),
        Value::Boolean(_) => NodeKind::BooleanLiteral,
        _ => NodeKind::Other,
    }
}

/// Correct `kind` using the literal's source text.
///
/// sqlparser reads a hex integer such as `0xFF` into the same value as the
/// hex string `X'FF'`; only the written form tells them apart.
pub fn kind_from_source(kind: NodeKind, source: &str) -> NodeKind {
    let is_hex_integer = source.starts_with("0x") || source.starts_with("0X");
    if kind == NodeKind::BytesLiteral && is_hex_integer {
        NodeKind::IntLiteral
    } else {
        kind
    }
}

fn number_kind(text: &str) -> NodeKind {
    if text.contains(['.', 'e', 'E']) {
        NodeKind::FloatLiteral
    } else {
        NodeKind::IntLiteral
    }
}

fn typed_string_kind(data_type: &DataType) -> NodeKind {
    match data_type {
        DataType::Date => NodeKind::DateOrTimeLiteral(DateTimeKind::Date),
        DataType::Time(..) => NodeKind::DateOrTimeLiteral(DateTimeKind::Time),
        DataType::Datetime(..) => NodeKind::DateOrTimeLiteral(DateTimeKind::Datetime),
        DataType::Timestamp(..) => NodeKind::DateOrTimeLiteral(DateTimeKind::Timestamp),
        DataType::Numeric(..) | DataType::Decimal(..) => NodeKind::NumericLiteral,
        _ => NodeKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlparser::dialect::BigQueryDialect;
    use sqlparser::parser::Parser;

    fn kind_of(sql: &str) -> NodeKind {
        let expr = Parser::new(&BigQueryDialect {})
            .try_with_sql(sql)
            .unwrap()
            .parse_expr()
            .unwrap();
        node_kind(&expr)
    }

    #[test]
    fn scalar_literals() {
        assert_eq!(kind_of("'abc'"), NodeKind::StringLiteral);
        assert_eq!(kind_of("b'abc'"), NodeKind::BytesLiteral);
        assert_eq!(kind_of("42"), NodeKind::IntLiteral);
        assert_eq!(kind_of("4.2"), NodeKind::FloatLiteral);
        assert_eq!(kind_of("1e10"), NodeKind::FloatLiteral);
        assert_eq!(kind_of("TRUE"), NodeKind::BooleanLiteral);
    }

    #[test]
    fn typed_strings() {
        assert_eq!(
            kind_of("DATE '2024-01-01'"),
            NodeKind::DateOrTimeLiteral(DateTimeKind::Date)
        );
        assert_eq!(
            kind_of("TIMESTAMP '2024-01-01 10:00:00'"),
            NodeKind::DateOrTimeLiteral(DateTimeKind::Timestamp)
        );
        assert_eq!(kind_of("NUMERIC '1.25'"), NodeKind::NumericLiteral);
    }

    #[test]
    fn constructors() {
        assert_eq!(kind_of("[1, 2]"), NodeKind::ArrayConstructor);
        assert_eq!(kind_of("STRUCT(1, 2)"), NodeKind::StructConstructorWithKeyword);
        assert_eq!(kind_of("(1, 2)"), NodeKind::StructConstructorWithParens);
    }

    #[test]
    fn hex_integers_are_told_apart_from_hex_strings_by_source() {
        assert_eq!(kind_of("0xFF"), NodeKind::BytesLiteral);
        assert_eq!(kind_from_source(NodeKind::BytesLiteral, "0xFF"), NodeKind::IntLiteral);
        assert_eq!(kind_from_source(NodeKind::BytesLiteral, "0X1a"), NodeKind::IntLiteral);
        assert_eq!(kind_from_source(NodeKind::BytesLiteral, "X'FF'"), NodeKind::BytesLiteral);
        assert_eq!(kind_from_source(NodeKind::StringLiteral, "'0x1'"), NodeKind::StringLiteral);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(kind_of("NULL"), NodeKind::Other);
        assert_eq!(kind_of("a + 1"), NodeKind::Other);
        assert_eq!(kind_of("(1)"), NodeKind::Other);
        assert!(!NodeKind::Other.is_literal_bearing());
    }
}
