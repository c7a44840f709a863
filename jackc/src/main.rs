//! Jack Compiler - Main Entry Point
//!
//! Compiles Jack source (`.jack`) directly to Jack VM code (`.vm`).
//!
//! # Modes
//! - **Single file**: `Main.jack` -> `Main.vm`.
//! - **Directory**: every `*.jack` file in the directory is compiled to its
//!   own sibling `.vm` file. Compilation order doesn't matter: pass 1 indexes
//!   every class's symbol table and subroutine signatures before pass 2 reads
//!   any of them, so cross-class references resolve regardless of which
//!   class was compiled first.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as ClapParser;
use log::info;

mod class_info;
mod errors;
mod parser;
mod symbol_table;
mod tokenizer;
mod vm_writer;

use class_info::ClassInfo;
use errors::{CompileError, Result};
use vm_writer::VmWriter;

/// Compiles Jack source to Jack VM code.
#[derive(clap::Parser)]
struct Cli {
    /// Input `.jack` file, or a directory containing `.jack` files
    path: String,
}

/// Collects the `.jack` files to compile from a file or directory argument.
fn plan(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("jack") {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

fn run(cli: &Cli) -> Result<()> {
    let input = Path::new(&cli.path);
    let files = plan(input)?;

    if files.is_empty() {
        return Err(CompileError::Lex(format!(
            "no .jack files found in {}",
            input.display()
        )));
    }

    let sources = files
        .iter()
        .map(|path| {
            info!("reading {}", path.display());
            let text = std::fs::read_to_string(path)?;
            let tokens = tokenizer::tokenize(&text)?;
            Ok((path.clone(), tokens))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut class_infos: HashMap<String, ClassInfo> = HashMap::new();
    for (path, tokens) in &sources {
        let (name, info) = parser::index_class(tokens)?;
        info!("indexed class {name} from {}", path.display());
        class_infos.insert(name, info);
    }

    for (path, tokens) in &sources {
        let output_path = path.with_extension("vm");
        let output_name = output_path
            .to_str()
            .ok_or_else(|| CompileError::Lex(format!("{}", output_path.display())))?;
        let mut writer = VmWriter::new(output_name)?;
        parser::compile_class(tokens, &class_infos, &mut writer)?;
        writer.close()?;
        info!("wrote {}", output_path.display());
    }

    println!(
        "Compilation complete: {} file(s) from {}",
        sources.len(),
        input.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_file_mode_compiles_just_that_file() {
        let tmp = tempfile::NamedTempFile::with_suffix(".jack").unwrap();
        let files = plan(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().to_path_buf()]);
    }

    #[test]
    fn directory_mode_collects_every_jack_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Main.jack"), "class Main {}\n").unwrap();
        std::fs::write(dir.path().join("Point.jack"), "class Point {}\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me\n").unwrap();

        let files = plan(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files
            .iter()
            .all(|f| f.extension().and_then(|e| e.to_str()) == Some("jack")));
    }
}
