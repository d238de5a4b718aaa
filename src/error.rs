//! Error types for TOON encoding and decoding.
//!
//! This module provides error reporting with enough context to point at the
//! offending input.
//!
//! ## Error Categories
//!
//! - **Parse errors**: malformed text, always carrying a line, a column, an
//!   [`ErrorKind`] and the source line as context
//! - **Depth errors**: nesting beyond the configured maximum
//! - **Construction errors**: duplicate map keys, numbers demanded from
//!   non-numeric tokens
//! - **Serde and I/O errors**: custom messages from `Serialize` /
//!   `Deserialize` implementations, reader/writer failures
//!
//! ## Examples
//!
//! ```rust
//! use toon_codec::{decode, ErrorKind};
//!
//! let err = decode("name: \"Alice").unwrap_err();
//! assert_eq!(err.kind(), Some(ErrorKind::UnterminatedQuotedString));
//!
//! // Messages include the line number and the line itself
//! assert!(err.to_string().contains("line 1"));
//! ```

use std::fmt;
use thiserror::Error;

/// Classification of codec failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A line's indentation matches no open block, or a block is missing.
    UnexpectedIndentation,
    UnterminatedQuotedString,
    InvalidEscapeSequence,
    DuplicateKey,
    /// A key or list item announced a nested block that never came.
    UnexpectedEndOfInput,
    MaxDepthExceeded,
    InvalidNumberLiteral,
    /// Text after a closing quote, or a line that starts with `:`.
    UnexpectedCharacter,
    /// Map entries and list items mixed in one block.
    MixedBlock,
    /// An empty element in a comma-separated list.
    EmptyToken,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::UnexpectedIndentation => "Unexpected indentation",
            ErrorKind::UnterminatedQuotedString => "Unterminated quoted string",
            ErrorKind::InvalidEscapeSequence => "Invalid escape sequence",
            ErrorKind::DuplicateKey => "Duplicate key",
            ErrorKind::UnexpectedEndOfInput => "Unexpected end of input",
            ErrorKind::MaxDepthExceeded => "Maximum depth exceeded",
            ErrorKind::InvalidNumberLiteral => "Invalid number literal",
            ErrorKind::UnexpectedCharacter => "Unexpected character",
            ErrorKind::MixedBlock => "Mixed block",
            ErrorKind::EmptyToken => "Empty token",
        };
        f.write_str(name)
    }
}

/// A decoding failure at a specific position.
///
/// `line` and `col` are 1-based; `col` counts characters, not bytes.
/// `context` holds the offending source line and `token` the offending
/// token when there is one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {col}: {msg}\n{context}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub line: usize,
    pub col: usize,
    pub msg: String,
    pub token: Option<String>,
    pub context: String,
}

impl ParseError {
    /// Creates a positioned parse error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::{ErrorKind, ParseError};
    ///
    /// let err = ParseError::new(ErrorKind::DuplicateKey, 3, 1, "key `id` already defined", "id: 2");
    /// assert!(err.to_string().contains("line 3"));
    /// assert!(err.to_string().contains("id: 2"));
    /// ```
    pub fn new(kind: ErrorKind, line: usize, col: usize, msg: &str, context: &str) -> Self {
        ParseError {
            kind,
            line,
            col,
            msg: msg.to_string(),
            token: None,
            context: context.to_string(),
        }
    }

    /// Attaches the offending token.
    #[must_use]
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Represents all possible errors that can occur while encoding or decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Malformed TOON text
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Nesting deeper than the configured maximum while encoding
    #[error("Maximum depth exceeded: nesting deeper than {limit} levels")]
    MaxDepthExceeded { limit: usize },

    /// A map was built with the same key twice
    #[error("Duplicate key: {key:?}")]
    DuplicateKey { key: String },

    /// A number was demanded from a token that is not a numeric literal
    #[error("Invalid number literal: {token:?}")]
    InvalidNumberLiteral { token: String },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Returns the failure class, if this error has one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::{Error, ErrorKind};
    ///
    /// let err = Error::MaxDepthExceeded { limit: 4 };
    /// assert_eq!(err.kind(), Some(ErrorKind::MaxDepthExceeded));
    /// assert_eq!(Error::custom("boom").kind(), None);
    /// ```
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Parse(err) => Some(err.kind),
            Error::MaxDepthExceeded { .. } => Some(ErrorKind::MaxDepthExceeded),
            Error::DuplicateKey { .. } => Some(ErrorKind::DuplicateKey),
            Error::InvalidNumberLiteral { .. } => Some(ErrorKind::InvalidNumberLiteral),
            Error::UnsupportedType(_) | Error::Io(_) | Error::Custom(_) => None,
        }
    }

    /// Returns the parse error details when this is a decoding failure.
    #[must_use]
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }

    /// Creates an unsupported type error for types that cannot be represented.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use toon_codec::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            ErrorKind::UnexpectedIndentation,
            4,
            3,
            "indent of 3 matches no open block",
            "   x: 1",
        )
        .with_token("x");
        let msg = err.to_string();
        assert!(msg.starts_with("Unexpected indentation at line 4, column 3"));
        assert!(msg.ends_with("   x: 1"));
        assert_eq!(err.token.as_deref(), Some("x"));
    }

    #[test]
    fn test_kind_passes_through_parse_errors() {
        let err: Error = ParseError::new(ErrorKind::EmptyToken, 1, 4, "empty", "a, , b").into();
        assert_eq!(err.kind(), Some(ErrorKind::EmptyToken));
        assert!(err.as_parse_error().is_some());
    }

    #[test]
    fn test_construction_errors_have_kinds() {
        let err = Error::DuplicateKey {
            key: "id".to_string(),
        };
        assert_eq!(err.kind(), Some(ErrorKind::DuplicateKey));
        let err = Error::InvalidNumberLiteral {
            token: "abc".to_string(),
        };
        assert_eq!(err.kind(), Some(ErrorKind::InvalidNumberLiteral));
        assert!(err.to_string().contains("\"abc\""));
    }
}
