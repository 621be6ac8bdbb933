use thiserror::Error;

/// Errors raised while parsing a statement or replacing its literals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input is not valid SQL for the configured dialect.
    #[error("SQL parse error: {0}")]
    Parse(String),

    /// The collected literals disagree with the source text or with each
    /// other. Never expected for well-formed parser output.
    #[error("internal error: {0}")]
    Internal(String),

    /// Parser options could not be loaded.
    #[error("invalid parser options: {0}")]
    Options(String),
}

impl Error {
    /// Process exit code the CLI uses for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Parse(_) => 1,
            Error::Internal(_) | Error::Options(_) => 2,
        }
    }
}

impl From<sqlparser::parser::ParserError> for Error {
    fn from(value: sqlparser::parser::ParserError) -> Self {
        use sqlparser::parser::ParserError;
        // Keep the bare diagnostic so the message carries a single prefix.
        match value {
            ParserError::TokenizerError(message) | ParserError::ParserError(message) => {
                Error::Parse(message)
            }
            ParserError::RecursionLimitExceeded => {
                Error::Parse("recursion limit exceeded".to_string())
            }
        }
    }
}

impl From<sqlparser::tokenizer::TokenizerError> for Error {
    fn from(value: sqlparser::tokenizer::TokenizerError) -> Self {
        Error::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_separate_parse_failures_from_internal_ones() {
        assert_eq!(Error::Parse("x".into()).exit_code(), 1);
        assert_eq!(Error::Internal("x".into()).exit_code(), 2);
        assert_eq!(Error::Options("x".into()).exit_code(), 2);
    }

    #[test]
    fn messages_are_prefixed_by_kind() {
        assert_eq!(
            Error::Internal("span 3..2 is empty".into()).to_string(),
            "internal error: span 3..2 is empty"
        );
    }
}
