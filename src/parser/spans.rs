use sqlparser::ast::{DataType, Expr, Spanned};
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::parser::location::{ByteSpan, LocationTranslator};
use crate::parser::options::SqlDialect;
use crate::parser::sql_parser::{LocatedToken, ParsedSql};

/// Resolves the byte range covered by a literal-bearing expression.
///
/// sqlparser records exact token spans for scalar values, but the span it
/// reports for a constructor is only the union of its elements. The
/// resolver widens those ranges over the delimiting tokens so that a
/// constructor covers its brackets and leading keyword as written.
#[derive(Debug, Clone)]
pub struct SpanResolver<'p> {
    translator: LocationTranslator<'p>,
    tokens: &'p [LocatedToken],
    dialect: SqlDialect,
}

impl<'p> SpanResolver<'p> {
    /// Build a resolver over a parsed source.
    pub fn new(parsed: &'p ParsedSql<'_>) -> Self {
        Self {
            translator: parsed.translator(),
            tokens: parsed.tokens(),
            dialect: parsed.options().dialect,
        }
    }

    /// Byte range of `expr`, or `None` when it has no parse location.
    ///
    /// Only literal-bearing expressions (scalar values, typed strings,
    /// arrays, structs and tuples, and `expr AS name` struct fields) are
    /// resolved.
    pub fn resolve(&self, expr: &Expr) -> Option<ByteSpan> {
        match expr {
            Expr::Value(value) => self.translator.byte_span(value.span),
            Expr::TypedString(typed) => {
                let value = self.translator.byte_span(expr.span())?;
                self.with_data_type(&typed.data_type, value)
            }
            Expr::Array(array) => {
                let inner = self.union(&array.elem)?;
                let bracketed = self.enclose(inner, &Token::LBracket, &Token::RBracket)?;
                Some(self.with_keyword_prefix(bracketed, "ARRAY"))
            }
            Expr::Struct { values, .. } => {
                let inner = self.union(values)?;
                let parenthesized = self.enclose(inner, &Token::LParen, &Token::RParen)?;
                let with_keyword = self.with_keyword_prefix(parenthesized, "STRUCT");
                // Without the keyword this is not the constructor sqlparser reported.
                (with_keyword != parenthesized).then_some(with_keyword)
            }
            Expr::Tuple(items) => {
                let inner = self.union(items)?;
                self.enclose(inner, &Token::LParen, &Token::RParen)
            }
            Expr::Named { expr, name } => {
                let value = self.resolve(expr)?;
                let alias = self.translator.byte_span(name.span)?;
                Some(value.cover(alias))
            }
            _ => None,
        }
    }

    fn union(&self, exprs: &[Expr]) -> Option<ByteSpan> {
        let mut spans = exprs.iter().map(|e| self.resolve(e));
        let first = spans.next()??;
        spans.try_fold(first, |acc, span| Some(acc.cover(span?)))
    }

    fn token_starting_at(&self, offset: usize) -> Option<usize> {
        self.tokens
            .binary_search_by_key(&offset, |t| t.span.start)
            .ok()
    }

    fn previous_significant(&self, index: usize) -> Option<usize> {
        self.tokens[..index].iter().rposition(|t| !t.is_trivia())
    }

    fn next_significant(&self, index: usize) -> Option<usize> {
        self.tokens[index..]
            .iter()
            .position(|t| !t.is_trivia())
            .map(|offset| index + offset)
    }

    /// Extend `inner` to the `open`/`close` tokens immediately around it.
    fn enclose(&self, inner: ByteSpan, open: &Token, close: &Token) -> Option<ByteSpan> {
        let first = self.token_starting_at(inner.start)?;
        let open_index = self.previous_significant(first)?;
        let after = self.tokens.partition_point(|t| t.span.start < inner.end);
        let close_index = self.next_significant(after)?;
        let (open_token, close_token) = (&self.tokens[open_index], &self.tokens[close_index]);
        (open_token.token == *open && close_token.token == *close)
            .then(|| ByteSpan::new(open_token.span.start, close_token.span.end))
    }

    /// Extend a bracketed span to a leading `keyword` or `keyword<…>`.
    fn with_keyword_prefix(&self, span: ByteSpan, keyword: &str) -> ByteSpan {
        let Some(open) = self.token_starting_at(span.start) else {
            return span;
        };
        let Some(mut before) = self.previous_significant(open) else {
            return span;
        };
        if matches!(self.tokens[before].token, Token::Gt | Token::ShiftRight) {
            match self.matching_angle_open(before) {
                Some(lt) => match self.previous_significant(lt) {
                    Some(index) => before = index,
                    None => return span,
                },
                None => return span,
            }
        }
        let candidate = &self.tokens[before];
        if candidate.is_word(keyword) {
            ByteSpan::new(candidate.span.start, span.end)
        } else {
            span
        }
    }

    /// Walk back from a closing `>` (or `>>`) to its opening `<`.
    fn matching_angle_open(&self, close: usize) -> Option<usize> {
        let mut depth = 0i32;
        for index in (0..=close).rev() {
            match self.tokens[index].token {
                Token::Gt => depth += 1,
                Token::ShiftRight => depth += 2,
                Token::Lt => depth -= 1,
                Token::ShiftLeft => depth -= 2,
                Token::LParen | Token::RParen | Token::SemiColon => return None,
                _ => {}
            }
            if depth == 0 {
                return Some(index);
            }
            if depth < 0 {
                return None;
            }
        }
        None
    }

    /// Extend a typed string's value over the data type written before it
    /// (`DATE '2024-01-01'`, `TIMESTAMP WITH TIME ZONE '…'`).
    ///
    /// The rendered data type is tokenized and matched backwards against the
    /// source tokens; `None` when they do not line up.
    fn with_data_type(&self, data_type: &DataType, value: ByteSpan) -> Option<ByteSpan> {
        let rendered = data_type.to_string();
        let dialect = self.dialect.dialect();
        let expected: Vec<Token> = Tokenizer::new(dialect.as_ref(), &rendered)
            .tokenize()
            .ok()?
            .into_iter()
            .filter(|token| !matches!(token, Token::Whitespace(_)))
            .collect();
        if expected.is_empty() {
            return None;
        }

        let mut index = self.token_starting_at(value.start)?;
        for token in expected.iter().rev() {
            index = self.previous_significant(index)?;
            if !same_token(&self.tokens[index].token, token) {
                return None;
            }
        }
        Some(ByteSpan::new(self.tokens[index].span.start, value.end))
    }
}

/// Token equality with keywords and identifiers compared case-insensitively.
fn same_token(source: &Token, rendered: &Token) -> bool {
    match (source, rendered) {
        (Token::Word(a), Token::Word(b)) => {
            a.quote_style == b.quote_style && a.value.eq_ignore_ascii_case(&b.value)
        }
        _ => source == rendered,
    }
}
