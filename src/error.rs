//! Hard errors raised while reading a RAW case.
//!
//! Anything in here aborts the parse; no partial [`Case`](crate::Case) is
//! returned. Recoverable problems are [`Warning`](crate::Warning)s instead.

use thiserror::Error;

/// A structural failure of the input that stops parsing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read case file: {0}")]
    Io(#[from] std::io::Error),

    #[error("case has {found} lines and at least 3 are required")]
    TooFewLines { found: usize },

    #[error(
        "on line {line} in the \"{section}\" section, at least {min} values were expected but only {found} were found\nparsed: {tokens:?}"
    )]
    TooFewFields {
        section: &'static str,
        line: usize,
        min: usize,
        found: usize,
        tokens: Vec<String>,
    },

    #[error(
        "on line {line} in the \"{section}\" section, {field} = {token:?} is not a valid {expected}\nparsed: {tokens:?}"
    )]
    MalformedValue {
        section: &'static str,
        line: usize,
        field: &'static str,
        token: String,
        expected: &'static str,
        tokens: Vec<String>,
    },

    #[error("on line {line} in the \"{section}\" section, more than one comment delimiter '/' was found")]
    MalformedLine { section: &'static str, line: usize },

    #[error("case type (ic) value of {value:?} given, only a value of 0 is supported")]
    UnsupportedCaseType { value: String },

    #[error("input ended on line {line} while reading the \"{section}\" section")]
    UnexpectedEnd { section: &'static str, line: usize },
}

impl Error {
    /// Attach line context to a record-level failure.
    pub(crate) fn from_field(
        err: FieldError,
        section: &'static str,
        line: usize,
        tokens: &[String],
    ) -> Self {
        match err {
            FieldError::TooFew { min, found } => Error::TooFewFields {
                section,
                line,
                min,
                found,
                tokens: tokens.to_vec(),
            },
            FieldError::Malformed {
                field,
                token,
                expected,
            } => Error::MalformedValue {
                section,
                line,
                field,
                token,
                expected,
                tokens: tokens.to_vec(),
            },
        }
    }
}

/// Failure to build a single record from its positional tokens.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("at least {min} values were expected but only {found} were found")]
    TooFew { min: usize, found: usize },

    #[error("{field} = {token:?} is not a valid {expected}")]
    Malformed {
        field: &'static str,
        token: String,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
