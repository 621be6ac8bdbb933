use crate::error::Error;
use crate::parser::location::ByteSpan;
use crate::parser::options::ProductMode;
use crate::rewriter::collector::LiteralOccurrence;
use crate::rewriter::namer::ParameterNamer;
use crate::rewriter::replacement::LiteralReplacement;

/// Rebuild `sql` with every literal of `literals` replaced by `@name`.
///
/// `literals` must be sorted by start offset. In one left-to-right pass:
///
/// - a literal with the same span and canonical text as the one before it
///   is the same literal repeated in the tree; it reuses that literal's name
///   and emits nothing;
/// - a literal ending at or before the text already emitted lies inside a
///   substituted constructor and is skipped; the last generated name
///   stays current, so a repeat of the skipped literal is bound to it;
/// - otherwise the text up to the literal is copied and `@name` appended,
///   followed by a space when the next source character could otherwise
///   join the placeholder (`x='a'AND` becomes `x=@_p0_STRING AND`).
///
/// Fails with [`Error::Internal`] when a span does not fit the text or
/// partially overlaps text already emitted.
pub fn splice_parameters(
    sql: &str,
    literals: &[LiteralOccurrence],
    mode: ProductMode,
) -> Result<LiteralReplacement, Error> {
    let mut replacement = LiteralReplacement {
        result_sql: String::with_capacity(sql.len()),
        ..LiteralReplacement::default()
    };
    let mut namer = ParameterNamer::new(mode);
    let mut prefix_offset = 0usize;
    let mut last_parameter_name: Option<String> = None;

    for (index, literal) in literals.iter().enumerate() {
        check_span(sql, literal)?;
        let ByteSpan { start, end } = literal.span;

        if index > 0 && literal.is_same_literal(&literals[index - 1]) {
            if let Some(name) = &last_parameter_name {
                replacement.bind_literal(literal.id, name)?;
            }
            continue;
        }
        if end <= prefix_offset {
            continue;
        }
        if start < prefix_offset {
            return Err(Error::Internal(format!(
                "literal {} at {} overlaps text already emitted up to {prefix_offset}",
                literal.canonical, literal.span
            )));
        }

        let name = namer.next_name(literal.kind);
        replacement.result_sql.push_str(&sql[prefix_offset..start]);
        replacement.result_sql.push('@');
        replacement.result_sql.push_str(&name);
        if sql[end..]
            .chars()
            .next()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '@')
        {
            replacement.result_sql.push(' ');
        }
        tracing::trace!(parameter = %name, literal = %literal.canonical, span = %literal.span, "substituted literal");

        replacement.bind_literal(literal.id, &name)?;
        replacement.bind_parameter(&name, &sql[start..end])?;
        prefix_offset = end;
        last_parameter_name = Some(name);
    }
    replacement.result_sql.push_str(&sql[prefix_offset..]);

    tracing::debug!(
        parameters = namer.generated(),
        literals = literals.len(),
        "replaced literals by parameters"
    );
    Ok(replacement)
}

fn check_span(sql: &str, literal: &LiteralOccurrence) -> Result<(), Error> {
    let ByteSpan { start, end } = literal.span;
    if end <= start || end > sql.len() {
        return Err(Error::Internal(format!(
            "literal {} has span {} outside of the {}-byte query",
            literal.canonical,
            literal.span,
            sql.len()
        )));
    }
    if !sql.is_char_boundary(start) || !sql.is_char_boundary(end) {
        return Err(Error::Internal(format!(
            "literal {} has span {} splitting a character",
            literal.canonical, literal.span
        )));
    }
    Ok(())
}
