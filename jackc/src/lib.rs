//! Jack Compiler for the `Nand2Tetris` course
//!
//! Compiles Jack source files (`.jack`) directly to Jack VM code (`.vm`),
//! skipping the course toolchain's XML parse-tree intermediate.
//!
//! # Architecture
//!
//! - [`tokenizer`]: Scans a `.jack` file into an in-memory token stream.
//! - [`symbol_table`]: Per-class and per-subroutine variable tables.
//! - [`class_info`]: Cross-class metadata (symbol tables, subroutine
//!   signatures) produced by pass 1 and consulted by pass 2.
//! - [`parser`]: The recursive-descent grammar and syntax-directed VM code
//!   generator, run once per class per pass.
//! - [`vm_writer`]: Emits Jack VM command text.
//! - [`errors`]: The fatal, first-error-stops error taxonomy shared by all
//!   of the above.
//!
//! Compiling a set of classes is a two-pass [`Compiler::compile`]: pass 1
//! indexes every class's symbol tables and subroutine signatures without
//! emitting code, then pass 2 re-parses each class with full cross-class
//! visibility and writes its `.vm` file.
//!
//! # Example
//!
//! ```rust
//! use jackc::Compiler;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let class_path = dir.path().join("Main.jack");
//! std::fs::write(
//!     &class_path,
//!     "class Main {\n  function void main() {\n    return;\n  }\n}\n",
//! )
//! .unwrap();
//!
//! let compiler = Compiler::new();
//! compiler.compile(&[class_path]).unwrap();
//!
//! let vm = std::fs::read_to_string(dir.path().join("Main.vm")).unwrap();
//! assert!(vm.contains("function Main.main 0"));
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub mod class_info;
pub mod errors;
pub mod parser;
pub mod symbol_table;
pub mod tokenizer;
pub mod vm_writer;

pub use class_info::ClassInfo;
pub use errors::{CompileError, Result};
pub use tokenizer::Token;
pub use vm_writer::VmWriter;

/// Drives the two-pass compilation of a set of `.jack` files.
#[derive(Debug, Default)]
pub struct Compiler;

impl Compiler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Compiles every listed `.jack` file, writing one sibling `.vm` file per
    /// class. Order doesn't matter: pass 1 fully indexes every class before
    /// pass 2 reads any of them.
    pub fn compile(&self, paths: &[PathBuf]) -> Result<()> {
        let sources: Vec<(PathBuf, Vec<Token>)> = paths
            .iter()
            .map(|path| {
                let text = std::fs::read_to_string(path)?;
                let tokens = tokenizer::tokenize(&text)?;
                Ok((path.clone(), tokens))
            })
            .collect::<Result<_>>()?;

        let mut class_infos: HashMap<String, ClassInfo> = HashMap::new();
        for (_, tokens) in &sources {
            let (name, info) = parser::index_class(tokens)?;
            class_infos.insert(name, info);
        }

        for (path, tokens) in &sources {
            let output_path = vm_path_for(path);
            let mut writer = VmWriter::new(
                output_path
                    .to_str()
                    .ok_or_else(|| CompileError::Lex(format!("{}", output_path.display())))?,
            )?;
            parser::compile_class(tokens, &class_infos, &mut writer)?;
            writer.close()?;
        }

        Ok(())
    }
}

fn vm_path_for(jack_path: &Path) -> PathBuf {
    jack_path.with_extension("vm")
}
