//! The Checker module is in charge of taking Teeny
//! source text and deciding whether it is a valid program.
//!
//! It does this with a simple tokenizer and a single-lookahead
//! recursive descent parser that tracks labels and identifiers
//! while it walks the tokens. Nothing is kept once a run ends
//! except its trace and a summary of the names it saw.

pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbols;
pub mod trace;

pub use self::error::{Error, LexError, ParseError};
pub use self::lexer::{tokenize, Token, TokenKind};
pub use self::parser::Parser;
pub use self::symbols::SymbolTable;
pub use self::trace::Trace;

/// Names collected by an accepted run.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Summary {
    pub tokens: usize,
    pub labels: Vec<String>,
    pub gotos: Vec<String>,
    pub identifiers: Vec<String>,
}

/// The result of one validation run. The trace is kept whether the
/// program was accepted or not.
#[derive(Debug)]
pub struct Validation {
    pub trace: Trace,
    pub outcome: Result<Summary, Error>,
}

impl Validation {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Tokenizes and validates a complete program with fresh state.
pub fn validate(source: &str) -> Validation {
    let mut trace = Trace::new();
    let outcome = run(source, &mut trace);

    match &outcome {
        Ok(summary) => info!(
            "accepted: {} token(s), {} label(s), {} identifier(s)",
            summary.tokens, summary.labels.len(), summary.identifiers.len()
        ),
        Err(e) => debug!("rejected after {} trace entries: {}", trace.len(), e),
    }

    Validation { trace, outcome }
}

fn run(source: &str, trace: &mut Trace) -> Result<Summary, Error> {
    let tokens = tokenize(source, trace)?;
    let count = tokens.len();
    debug!("lexed {} token(s)", count);

    let symbols = Parser::new(tokens, trace).run()?;

    Ok(Summary {
        tokens: count,
        labels: symbols.declared_labels(),
        gotos: symbols.referenced_labels(),
        identifiers: symbols.declared_idents(),
    })
}
