use sqlparser::ast::Expr;

use crate::classifier::node_kind::{node_kind, NodeKind};

/// Returns `true` when `expr` denotes a constant value.
///
/// Scalar literals always qualify. Array and struct constructors qualify
/// when every element (every field expression, for structs) is itself a
/// literal. Struct fields written `expr AS name` are judged by `expr`.
pub fn is_literal(expr: &Expr) -> bool {
    match node_kind(expr) {
        NodeKind::Other => false,
        NodeKind::ArrayConstructor => match expr {
            Expr::Array(array) => array.elem.iter().all(is_literal),
            _ => false,
        },
        NodeKind::StructConstructorWithKeyword => match expr {
            Expr::Struct { values, .. } => values.iter().all(|field| is_literal(field_expr(field))),
            _ => false,
        },
        NodeKind::StructConstructorWithParens => match expr {
            Expr::Tuple(items) => items.iter().all(is_literal),
            _ => false,
        },
        _ => true,
    }
}

/// The value expression of a struct constructor field.
pub fn field_expr(field: &Expr) -> &Expr {
    match field {
        Expr::Named { expr, .. } => expr,
        other => other,
    }
}
