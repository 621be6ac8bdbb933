use std::fmt;

use serde::Serialize;

use crate::classifier::node_kind::{DateTimeKind, NodeKind};
use crate::parser::options::ProductMode;

/// Semantic type of a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKind {
    /// Character string.
    String,
    /// Byte string.
    Bytes,
    /// 64-bit integer.
    Int64,
    /// Double-precision float.
    Double,
    /// Exact decimal.
    Numeric,
    /// Boolean.
    Bool,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Civil date and time.
    Datetime,
    /// Absolute point in time.
    Timestamp,
    /// Array.
    Array,
    /// Struct.
    Struct,
    /// Not a literal type.
    Unknown,
}

impl TypeKind {
    /// Type of a literal node of the given kind.
    pub fn of_literal(kind: NodeKind) -> TypeKind {
        match kind {
            NodeKind::StringLiteral => TypeKind::String,
            NodeKind::BytesLiteral => TypeKind::Bytes,
            NodeKind::IntLiteral => TypeKind::Int64,
            NodeKind::FloatLiteral => TypeKind::Double,
            NodeKind::NumericLiteral => TypeKind::Numeric,
            NodeKind::BooleanLiteral => TypeKind::Bool,
            NodeKind::DateOrTimeLiteral(DateTimeKind::Date) => TypeKind::Date,
            NodeKind::DateOrTimeLiteral(DateTimeKind::Time) => TypeKind::Time,
            NodeKind::DateOrTimeLiteral(DateTimeKind::Datetime) => TypeKind::Datetime,
            NodeKind::DateOrTimeLiteral(DateTimeKind::Timestamp) => TypeKind::Timestamp,
            NodeKind::ArrayConstructor => TypeKind::Array,
            NodeKind::StructConstructorWithKeyword | NodeKind::StructConstructorWithParens => {
                TypeKind::Struct
            }
            NodeKind::Other => TypeKind::Unknown,
        }
    }

    /// Display name of the type under `mode`.
    pub fn name(self, mode: ProductMode) -> &'static str {
        match self {
            TypeKind::String => "STRING",
            TypeKind::Bytes => "BYTES",
            TypeKind::Int64 => "INT64",
            TypeKind::Double => match mode {
                ProductMode::Internal => "DOUBLE",
                ProductMode::External => "FLOAT64",
            },
            TypeKind::Numeric => "NUMERIC",
            TypeKind::Bool => "BOOL",
            TypeKind::Date => "DATE",
            TypeKind::Time => "TIME",
            TypeKind::Datetime => "DATETIME",
            TypeKind::Timestamp => "TIMESTAMP",
            TypeKind::Array => "ARRAY",
            TypeKind::Struct => "STRUCT",
            TypeKind::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(ProductMode::Internal))
    }
}
