//! Failure types for a validation run.
//!
//! Every fault is fatal: the first one raised ends the run.
use thiserror::Error;

use super::lexer::TokenKind;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum LexError {
    #[error("unexpected character '{0}' on line {1}")]
    UnexpectedChar(char, usize),

    #[error("unterminated string literal starting on line {0}")]
    UnterminatedString(usize),
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ParseError {
    #[error("expected {expected} but got {found} on line {line}")]
    UnexpectedToken { expected: TokenKind, found: TokenKind, line: usize },

    #[error("expected comparison operator but got `{found}` on line {line}")]
    ExpectedComparator { found: String, line: usize },

    #[error("expected number or identifier but got {kind} `{found}` on line {line}")]
    ExpectedPrimary { kind: TokenKind, found: String, line: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("label `{name}` on line {line} has already been declared")]
    DuplicateLabel { name: String, line: usize },

    #[error("identifier `{name}` on line {line} hasn't been declared yet")]
    UndeclaredIdent { name: String, line: usize },

    #[error("label `{name}` targeted by GOTO on line {line} hasn't been declared")]
    UndeclaredLabel { name: String, line: usize },
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Error {
    #[error("lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("parser error: {0}")]
    Parse(#[from] ParseError),
}
