use std::fmt;
use std::io;

use thiserror::Error;

use crate::Tag;

/// Errors produced while building, encoding, decoding or parsing NBT.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A bounded integer was outside the range of its kind.
    #[error("{value} is out of range for {tag} (expected {min}..={max}){}", located(.at))]
    Range {
        tag: Tag,
        value: i64,
        min: i64,
        max: i64,
        /// Line and column of the literal, when parsed from SNBT.
        at: Option<(usize, usize)>,
    },
    /// A value of the wrong kind was given where another kind is required.
    #[error("type error: {0}")]
    Type(Box<str>),
    /// Malformed binary data, or a structurally invalid SNBT document.
    #[error("format error: {0}")]
    Format(Box<str>),
    /// SNBT text that does not follow the grammar.
    #[error("syntax error {0}")]
    Syntax(#[from] SyntaxError),
    /// The underlying reader or writer failed.
    #[error("an I/O error occurred: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn format(msg: impl Into<Box<str>>) -> Self {
        Self::Format(msg.into())
    }

    pub(crate) fn type_error(msg: impl Into<Box<str>>) -> Self {
        Self::Type(msg.into())
    }

    pub(crate) fn kind_mismatch(expected: Tag, found: Tag) -> Self {
        Self::type_error(format!("expected {expected}, found {found}"))
    }

    /// Builds a [`Error::Range`] for `value`. `tag` must be a bounded integer
    /// kind.
    pub(crate) fn range(tag: Tag, value: i64) -> Self {
        let (min, max) = tag.integer_range().unwrap_or((0, 0));
        Self::Range {
            tag,
            value,
            min,
            max,
            at: None,
        }
    }

    /// Attaches a one-based source position to a range, type or format error.
    pub(crate) fn with_location(self, line: usize, column: usize) -> Self {
        match self {
            Self::Range {
                tag,
                value,
                min,
                max,
                at: None,
            } => Self::Range {
                tag,
                value,
                min,
                max,
                at: Some((line, column)),
            },
            Self::Type(msg) => Self::type_error(format!("{msg} (at {line},{column})")),
            Self::Format(msg) => Self::format(format!("{msg} (at {line},{column})")),
            other => other,
        }
    }
}

fn located(at: &Option<(usize, usize)>) -> String {
    match at {
        Some((line, column)) => format!(" (at {line},{column})"),
        None => String::new(),
    }
}

/// An SNBT document that cannot be reduced to a valid object.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SyntaxError {
    pub message: Box<str>,
    pub line: usize,
    pub column: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<Box<str>>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@ {},{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for SyntaxError {}
