use sqlparser::ast::Statement;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::error::Error;
use crate::parser::location::{ByteSpan, LocationTranslator};
use crate::parser::options::ParserOptions;

/// A token of the source text with its byte range.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedToken {
    /// The token itself.
    pub token: Token,
    /// Byte range of the token in the source.
    pub span: ByteSpan,
}

impl LocatedToken {
    /// Whitespace and comments.
    pub fn is_trivia(&self) -> bool {
        matches!(self.token, Token::Whitespace(_))
    }

    /// True for a keyword or identifier spelled `word`, ignoring case.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.token, Token::Word(w) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(word))
    }
}

/// Parsed statements together with the exact text they were parsed from.
///
/// Parse locations inside the statements are only meaningful against `sql`,
/// so the two are kept together.
#[derive(Debug, Clone)]
pub struct ParsedSql<'a> {
    sql: &'a str,
    options: ParserOptions,
    statements: Vec<Statement>,
    tokens: Vec<LocatedToken>,
}

impl<'a> ParsedSql<'a> {
    /// Source text.
    pub fn sql(&self) -> &'a str {
        self.sql
    }

    /// Options the text was parsed with.
    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parsed statements in source order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Source tokens in order, including whitespace and comments.
    pub fn tokens(&self) -> &[LocatedToken] {
        &self.tokens
    }

    /// Line/column to byte-offset translator for the source text.
    pub fn translator(&self) -> LocationTranslator<'a> {
        LocationTranslator::new(self.sql)
    }
}

/// Parse `sql` into one or more statements.
///
/// Fails with [`Error::Parse`] when the text is not valid SQL for the
/// configured dialect, or contains no statement at all.
pub fn parse_sql<'a>(sql: &'a str, options: &ParserOptions) -> Result<ParsedSql<'a>, Error> {
    let dialect = options.dialect.dialect();
    let statements = Parser::parse_sql(dialect.as_ref(), sql)?;
    if statements.is_empty() {
        return Err(Error::Parse("no SQL statement found".to_string()));
    }

    let translator = LocationTranslator::new(sql);
    let tokens = Tokenizer::new(dialect.as_ref(), sql)
        .tokenize_with_location()?
        .into_iter()
        .map(|token| {
            let span = translator.byte_span(token.span).ok_or_else(|| {
                Error::Internal(format!(
                    "token {:?} has an unresolvable location {:?}",
                    token.token, token.span
                ))
            })?;
            Ok(LocatedToken {
                token: token.token,
                span,
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    tracing::debug!(
        statements = statements.len(),
        tokens = tokens.len(),
        dialect = ?options.dialect,
        "parsed SQL"
    );

    Ok(ParsedSql {
        sql,
        options: *options,
        statements,
        tokens,
    })
}
