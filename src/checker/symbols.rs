//! Label and identifier bookkeeping for one validation run.
//!
//! Teeny has a single flat namespace, so there is no scope stack.
use std::collections::HashSet;

use super::error::ParseError;

#[derive(Debug, Default)]
pub struct SymbolTable {
    declared_labels: HashSet<String>,
    // GOTO targets in the order first seen, with the line of that first GOTO.
    referenced_labels: Vec<(String, usize)>,
    declared_idents: HashSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a LABEL. A name may only be declared once.
    pub fn declare_label(&mut self, name: &str, line: usize) -> Result<(), ParseError> {
        if !self.declared_labels.insert(name.to_owned()) {
            return Err(ParseError::DuplicateLabel { name: name.to_owned(), line });
        }
        Ok(())
    }

    /// Records a GOTO target. It is only checked by `check_labels`.
    pub fn reference_label(&mut self, name: &str, line: usize) {
        if !self.referenced_labels.iter().any(|(n, _)| n == name) {
            self.referenced_labels.push((name.to_owned(), line));
        }
    }

    /// Registers a LET or INPUT target. Redeclaring is allowed.
    pub fn declare_ident(&mut self, name: &str) {
        self.declared_idents.insert(name.to_owned());
    }

    pub fn check_ident(&self, name: &str, line: usize) -> Result<(), ParseError> {
        if self.declared_idents.contains(name) {
            Ok(())
        } else {
            Err(ParseError::UndeclaredIdent { name: name.to_owned(), line })
        }
    }

    /// Fails on the first GOTO target, in source order, with no matching LABEL.
    pub fn check_labels(&self) -> Result<(), ParseError> {
        match self.referenced_labels.iter().find(|(name, _)| !self.declared_labels.contains(name)) {
            Some((name, line)) => Err(ParseError::UndeclaredLabel { name: name.clone(), line: *line }),
            None => Ok(()),
        }
    }

    pub fn declared_labels(&self) -> Vec<String> {
        sorted(self.declared_labels.iter())
    }

    pub fn referenced_labels(&self) -> Vec<String> {
        sorted(self.referenced_labels.iter().map(|(name, _)| name))
    }

    pub fn declared_idents(&self) -> Vec<String> {
        sorted(self.declared_idents.iter())
    }
}

fn sorted<'a, I: Iterator<Item = &'a String>>(names: I) -> Vec<String> {
    let mut out: Vec<String> = names.cloned().collect();
    out.sort();
    out
}
