//! Symbol tables mapping Jack variable names to their VM segment and index.
//!
//! Generalizes the assembler's `SymbolTable::get_or_insert` running-counter
//! idiom from one counter to four independent per-kind counters, one per
//! [`Kind`].

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    fn slot(self) -> usize {
        match self {
            Kind::Static => 0,
            Kind::Field => 1,
            Kind::Argument => 2,
            Kind::Local => 3,
        }
    }

    /// The VM memory segment a variable of this kind lives in.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Kind::Static => "static",
            Kind::Field => "this",
            Kind::Argument => "argument",
            Kind::Local => "local",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entry {
    pub var_type: String,
    pub kind: Kind,
    pub index: u16,
}

/// A single scope's worth of variable declarations. Class-scope tables hold
/// `Static`/`Field` entries; subroutine-scope tables hold `Argument`/`Local`
/// entries and are discarded when the subroutine ends.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,
    counters: [u16; 4],
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, var_type: &str, kind: Kind) {
        let index = self.counters[kind.slot()];
        self.counters[kind.slot()] += 1;
        self.entries.insert(
            name.to_string(),
            Entry {
                var_type: var_type.to_string(),
                kind,
                index,
            },
        );
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<Kind> {
        self.entries.get(name).map(|e| e.kind)
    }

    #[must_use]
    pub fn type_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.var_type.as_str())
    }

    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<u16> {
        self.entries.get(name).map(|e| e.index)
    }

    #[must_use]
    pub fn var_count(&self, kind: Kind) -> u16 {
        self.counters[kind.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_independent_running_indices_per_kind() {
        let mut table = SymbolTable::new();
        table.define("this", "Point", Kind::Argument);
        table.define("dx", "int", Kind::Argument);
        table.define("sum", "int", Kind::Local);

        assert_eq!(table.index_of("this"), Some(0));
        assert_eq!(table.index_of("dx"), Some(1));
        assert_eq!(table.index_of("sum"), Some(0));
        assert_eq!(table.var_count(Kind::Argument), 2);
        assert_eq!(table.var_count(Kind::Local), 1);
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let table = SymbolTable::new();
        assert!(!table.contains("missing"));
        assert_eq!(table.kind_of("missing"), None);
    }
}
