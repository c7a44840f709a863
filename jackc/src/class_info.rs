//! Cross-class metadata produced by pass 1 and consulted by pass 2.
//!
//! Mirrors the original compiler's `class_infos` cache: pass 1 parses every
//! class without emitting code and records each one's symbol tables and
//! subroutine signatures here; pass 2 re-parses with full visibility into
//! every other class's [`ClassInfo`], which is what lets a call site resolve
//! whether `Obj.method()` is a function or a method before it reaches
//! code generation.

use std::collections::HashMap;

use crate::symbol_table::SymbolTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

#[derive(Debug, Clone)]
pub struct SubroutineDescriptor {
    pub kind: SubroutineKind,
    pub return_type: String,
    /// Argument/local symbol table for this subroutine, seeded with the
    /// implicit `this` argument for methods.
    pub table: SymbolTable,
}

#[derive(Debug, Clone, Default)]
pub struct ClassInfo {
    /// Static/field symbol table for this class.
    pub class_table: SymbolTable,
    pub subroutines: HashMap<String, SubroutineDescriptor>,
}

impl ClassInfo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
