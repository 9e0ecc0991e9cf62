//! Centralised error hierarchy for the front end.
//!
//! The lexer and the parser both fail fast: the first problem becomes one of
//! the variants below and the whole call returns it. Nothing here prints
//! diagnostics; the driver decides how to show them.

use std::fmt;
use std::io;
use thiserror::Error;

use log::info;

use crate::token::TokenKind;

/// What the parser saw where it wanted something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A token of this kind, starting on `line`.
    Token { kind: TokenKind, line: usize },

    /// The token vector ran out.
    EndOfInput,
}

impl Found {
    pub fn line(&self) -> Option<usize> {
        match self {
            Found::Token { line, .. } => Some(*line),
            Found::EndOfInput => None,
        }
    }

    fn location(&self) -> String {
        match self {
            Found::Token { line, .. } => format!("line {}", line),
            Found::EndOfInput => "end of input".to_string(),
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Token { kind, .. } => write!(f, "{}", kind),
            Found::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// Which grammar position could not be started by the current token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Statement,
    Expression,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Statement => f.write_str("statement"),
            Construct::Expression => f.write_str("expression"),
        }
    }
}

/// Canonical error type of the crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrontendError {
    /// A character matched no token rule.
    #[error("[line {line}, column {column}] Error: invalid token {character:?}")]
    Lex {
        character: char,

        /// 1-based line of the character.
        line: usize,

        /// 1-based column of the character.
        column: usize,
    },

    /// A grammar rule required a token that is not there.
    #[error("[{}] Error: expected {expected} but found {found}", .found.location())]
    UnexpectedToken {
        /// Token kind (or `expression`) the rule wanted.
        expected: String,
        found: Found,
    },

    /// The current token cannot begin any alternative at this position.
    #[error("[line {line}] Error: invalid {construct} start {text:?}")]
    InvalidStart {
        construct: Construct,
        text: String,
        line: usize,
    },

    /// Integer literal outside the `i64` range, or a float literal too large
    /// for a finite `f64`.
    #[error("[line {line}] Error: numeric literal {text} is out of range")]
    InvalidLiteral { text: String, line: usize },

    /// Blocks or call arguments nested deeper than the parser allows.
    #[error("[line {line}] Error: nesting deeper than {limit} levels")]
    TooDeep { limit: usize, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF-8 decoding failure when ingesting a source file.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl FrontendError {
    /// Helper constructor for the **lexer**.
    pub fn lex(character: char, line: usize, column: usize) -> Self {
        info!(
            "Creating Lex error: character={:?}, line={}, column={}",
            character, line, column
        );

        FrontendError::Lex {
            character,
            line,
            column,
        }
    }

    /// Helper constructor for an expected-token mismatch.
    pub fn unexpected<S: Into<String>>(expected: S, found: Found) -> Self {
        let expected: String = expected.into();

        info!(
            "Creating UnexpectedToken error: expected={}, found={:?}",
            expected, found
        );

        FrontendError::UnexpectedToken { expected, found }
    }

    /// Helper constructor for a token that cannot start `construct`.
    pub fn invalid_start<S: Into<String>>(construct: Construct, text: S, line: usize) -> Self {
        let text: String = text.into();

        info!(
            "Creating InvalidStart error: construct={}, text={}, line={}",
            construct, text, line
        );

        FrontendError::InvalidStart {
            construct,
            text,
            line,
        }
    }

    pub fn invalid_literal<S: Into<String>>(text: S, line: usize) -> Self {
        let text: String = text.into();

        info!("Creating InvalidLiteral error: text={}, line={}", text, line);

        FrontendError::InvalidLiteral { text, line }
    }

    pub fn too_deep(limit: usize, line: usize) -> Self {
        info!("Creating TooDeep error: limit={}, line={}", limit, line);

        FrontendError::TooDeep { limit, line }
    }

    /// 1-based line of the failure, when the error has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            FrontendError::Lex { line, .. }
            | FrontendError::InvalidStart { line, .. }
            | FrontendError::InvalidLiteral { line, .. }
            | FrontendError::TooDeep { line, .. } => Some(*line),
            FrontendError::UnexpectedToken { found, .. } => found.line(),
            FrontendError::Io(_) | FrontendError::Utf8(_) => None,
        }
    }

    /// 1-based column; only lexical errors carry one.
    pub fn column(&self) -> Option<usize> {
        match self {
            FrontendError::Lex { column, .. } => Some(*column),
            _ => None,
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FrontendError>;
