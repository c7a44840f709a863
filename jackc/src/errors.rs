//! Error taxonomy for the Jack compiler.
//!
//! Every case is fatal: compilation of a class stops at the first error,
//! matching the toolchain-wide no-recovery error model.

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("lex error: {0}")]
    Lex(String),
    #[error("parse error: expected {expected}, found {found}")]
    Parse { expected: String, found: String },
    #[error("name error: unresolved identifier `{identifier}`")]
    Name { identifier: String },
}

pub type Result<T> = std::result::Result<T, CompileError>;
