//! Per-run record of every token produced and every production matched.
use std::fmt;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Trace {
    entries: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Trace { entries: Vec::with_capacity(256) }
    }

    /// Appends an entry and forwards it to the log at trace level.
    pub fn record<S: Into<String>>(&mut self, entry: S) {
        let entry = entry.into();
        trace!("{}", entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in self.entries.iter() {
            writeln!(f, "{}", entry)?;
        }
        Ok(())
    }
}
