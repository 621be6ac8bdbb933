use std::ops::ControlFlow;

use serde::Serialize;
use sqlparser::ast::{visit_expressions, Expr, Query, TableFactor, Visit, Visitor};

use crate::classifier::literal::is_literal;
use crate::classifier::node_kind::{kind_from_source, node_kind, NodeKind};
use crate::parser::location::ByteSpan;
use crate::parser::spans::SpanResolver;
use crate::parser::sql_parser::ParsedSql;

/// Identity of an expression node within one parsed script.
///
/// Assigned in pre-order over every expression of every statement, so two
/// nodes compare equal only when they are the same occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// A literal expression found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOccurrence {
    /// Node identity.
    pub id: NodeId,
    /// Syntactic kind, which determines the parameter type name.
    pub kind: NodeKind,
    /// Byte range in the source text.
    pub span: ByteSpan,
    /// Canonical rendering of the node's subtree.
    pub canonical: String,
}

impl LiteralOccurrence {
    /// True when both denote the same literal written at the same place,
    /// regardless of node identity.
    pub fn is_same_literal(&self, other: &LiteralOccurrence) -> bool {
        self.span == other.span && self.canonical == other.canonical
    }
}

/// A literal-bearing expression inside a hint or query setting.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HintValue {
    span: ByteSpan,
    canonical: String,
}

struct LiteralCollector<'r, 'p> {
    sql: &'p str,
    resolver: &'r SpanResolver<'p>,
    next_id: usize,
    candidates: Vec<LiteralOccurrence>,
    hint_values: Vec<HintValue>,
}

impl LiteralCollector<'_, '_> {
    /// Record every literal-bearing expression under `node` as a hint value.
    fn exclude_all(&mut self, node: &Expr) {
        let _ = visit_expressions(node, |expr| {
            if node_kind(expr).is_literal_bearing() {
                if let Some(span) = self.resolver.resolve(expr) {
                    self.hint_values.push(HintValue {
                        span,
                        canonical: expr.to_string(),
                    });
                }
            }
            ControlFlow::<()>::Continue(())
        });
    }
}

impl Visitor for LiteralCollector<'_, '_> {
    type Break = ();

    fn pre_visit_query(&mut self, query: &Query) -> ControlFlow<Self::Break> {
        for setting in query.settings.iter().flatten() {
            self.exclude_all(&setting.value);
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_table_factor(&mut self, table_factor: &TableFactor) -> ControlFlow<Self::Break> {
        if let TableFactor::Table { with_hints, .. } = table_factor {
            for hint in with_hints {
                self.exclude_all(hint);
            }
        }
        ControlFlow::Continue(())
    }

    fn pre_visit_expr(&mut self, expr: &Expr) -> ControlFlow<Self::Break> {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let kind = node_kind(expr);
        if !kind.is_literal_bearing() || !is_literal(expr) {
            return ControlFlow::Continue(());
        }
        let Some(span) = self.resolver.resolve(expr) else {
            tracing::debug!(node = id.0, literal = %expr, "literal has no parse location");
            return ControlFlow::Continue(());
        };
        let source = self.sql.get(span.start..span.end).unwrap_or_default();
        self.candidates.push(LiteralOccurrence {
            id,
            kind: kind_from_source(kind, source),
            span,
            canonical: expr.to_string(),
        });
        ControlFlow::Continue(())
    }
}

/// Gather the literals of every statement in `parsed`, sorted by start
/// offset.
///
/// Literals inside table hints and query settings are left out, and so is any literal whose
/// parse location cannot be resolved. Constructors are collected whole, but
/// their elements are collected too; the rewriter skips elements covered by
/// an already substituted constructor.
pub fn collect_literals(parsed: &ParsedSql<'_>) -> Vec<LiteralOccurrence> {
    let resolver = SpanResolver::new(parsed);
    let mut collector = LiteralCollector {
        sql: parsed.sql(),
        resolver: &resolver,
        next_id: 0,
        candidates: Vec::new(),
        hint_values: Vec::new(),
    };
    for statement in parsed.statements() {
        let _ = statement.visit(&mut collector);
    }

    let LiteralCollector {
        candidates,
        hint_values,
        ..
    } = collector;
    let mut literals: Vec<LiteralOccurrence> = candidates
        .into_iter()
        .filter(|literal| {
            let is_hint = hint_values
                .iter()
                .any(|hint| hint.span == literal.span && hint.canonical == literal.canonical);
            if is_hint {
                tracing::debug!(node = literal.id.0, literal = %literal.canonical, "skipping hint value");
            }
            !is_hint
        })
        .collect();
    literals.sort_by_key(|literal| literal.span.start);
    literals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::options::{ParserOptions, SqlDialect};
    use crate::parser::sql_parser::parse_sql;

    fn collect(sql: &str, dialect: SqlDialect) -> Vec<(NodeKind, String)> {
        let options = ParserOptions {
            dialect,
            ..ParserOptions::default()
        };
        let parsed = parse_sql(sql, &options).expect("test SQL should parse");
        collect_literals(&parsed)
            .into_iter()
            .map(|l| (l.kind, sql[l.span.start..l.span.end].to_string()))
            .collect()
    }

    #[test]
    fn collects_scalars_in_source_order() {
        let literals = collect(
            "SELECT a FROM t WHERE b = 'x' AND c > 3 OR d = 2.5",
            SqlDialect::BigQuery,
        );
        assert_eq!(
            literals,
            vec![
                (NodeKind::StringLiteral, "'x'".to_string()),
                (NodeKind::IntLiteral, "3".to_string()),
                (NodeKind::FloatLiteral, "2.5".to_string()),
            ]
        );
    }

    #[test]
    fn composite_literals_precede_their_elements() {
        let literals = collect("SELECT [1, 2]", SqlDialect::BigQuery);
        assert_eq!(
            literals,
            vec![
                (NodeKind::ArrayConstructor, "[1, 2]".to_string()),
                (NodeKind::IntLiteral, "1".to_string()),
                (NodeKind::IntLiteral, "2".to_string()),
            ]
        );
    }

    #[test]
    fn non_constant_constructors_contribute_only_their_literal_elements() {
        let literals = collect("SELECT [1, x]", SqlDialect::BigQuery);
        assert_eq!(literals, vec![(NodeKind::IntLiteral, "1".to_string())]);
    }

    #[test]
    fn null_is_not_collected() {
        assert!(collect("SELECT NULL", SqlDialect::BigQuery).is_empty());
    }

    #[test]
    fn table_hint_values_are_excluded() {
        let literals = collect(
            "SELECT * FROM t WITH (INDEX(1)) WHERE x = 5",
            SqlDialect::MsSql,
        );
        assert_eq!(literals, vec![(NodeKind::IntLiteral, "5".to_string())]);
    }

    #[test]
    fn query_setting_values_are_excluded() {
        let literals = collect(
            "SELECT * FROM t WHERE a = 2 SETTINGS max_threads = 8",
            SqlDialect::ClickHouse,
        );
        assert_eq!(literals, vec![(NodeKind::IntLiteral, "2".to_string())]);
    }

    #[test]
    fn hex_integers_are_collected_as_integers() {
        let literals = collect("SELECT 0xFF, X'FF'", SqlDialect::BigQuery);
        assert_eq!(
            literals,
            vec![
                (NodeKind::IntLiteral, "0xFF".to_string()),
                (NodeKind::BytesLiteral, "X'FF'".to_string()),
            ]
        );
    }

    #[test]
    fn node_ids_are_unique() {
        let options = ParserOptions::default();
        let parsed = parse_sql("SELECT 1, 2; SELECT 3", &options).expect("should parse");
        let literals = collect_literals(&parsed);
        let mut ids: Vec<NodeId> = literals.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn same_literal_compares_span_and_canonical_text_only() {
        let a = LiteralOccurrence {
            id: NodeId(1),
            kind: NodeKind::IntLiteral,
            span: ByteSpan::new(7, 8),
            canonical: "1".to_string(),
        };
        let b = LiteralOccurrence {
            id: NodeId(9),
            ..a.clone()
        };
        let c = LiteralOccurrence {
            canonical: "2".to_string(),
            ..a.clone()
        };
        assert!(a.is_same_literal(&b));
        assert!(!a.is_same_literal(&c));
    }
}
