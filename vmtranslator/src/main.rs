//! VM Translator - Main Entry Point
//!
//! Translates Jack VM code (`.vm`) into Hack assembly (`.asm`), implementing
//! the full function call/return protocol and program bootstrapping
//! (`Nand2Tetris` Projects 7-8).
//!
//! # Modes
//! - **Single file**: `in.vm` -> `in.asm`, no bootstrap code.
//! - **Directory**: every `*.vm` file in the directory is concatenated into
//!   one `Dir.asm`, preceded by a bootstrap sequence that sets `SP=256` and
//!   calls `Sys.init`. `Sys.vm`, if present, is translated first so that its
//!   static variables claim the lowest static indices, matching the
//!   reference toolchain's ordering.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};
use std::process;

use clap::Parser as ClapParser;
use log::info;

mod code_writer;
mod errors;
mod parser;

use code_writer::CodeWriter;
use errors::{Result, TranslateError};
use parser::{CommandType, Parser};

/// Translates VM code into Hack assembly.
#[derive(clap::Parser)]
struct Cli {
    /// Input `.vm` file, or a directory containing `.vm` files
    path: String,
}

/// Collects the `.vm` files to translate, ordered with `Sys.vm` first when
/// present, and whether the bootstrap sequence should be emitted.
fn plan(input: &Path) -> Result<(Vec<PathBuf>, PathBuf, bool)> {
    if input.is_dir() {
        let mut sys_vm = None;
        let mut rest = Vec::new();
        for entry in std::fs::read_dir(input)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("vm") {
                continue;
            }
            if path.file_name().and_then(|n| n.to_str()) == Some("Sys.vm") {
                sys_vm = Some(path);
            } else {
                rest.push(path);
            }
        }
        rest.sort();

        let mut files = Vec::with_capacity(rest.len() + 1);
        files.extend(sys_vm);
        files.extend(rest);

        let dir_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("out");
        let output = input.join(format!("{dir_name}.asm"));
        Ok((files, output, true))
    } else {
        let output = input.with_extension("asm");
        Ok((vec![input.to_path_buf()], output, false))
    }
}

fn translate_file(path: &Path, writer: &mut CodeWriter) -> Result<()> {
    let filename = path
        .to_str()
        .ok_or_else(|| TranslateError::MalformedCommand(format!("{}", path.display())))?;
    let mut parser = Parser::new(filename)?;
    writer.set_filename(filename);

    while parser.has_more_commands() {
        parser.advance();

        match parser.command_type()? {
            CommandType::Arithmetic => writer.write_arithmetic(parser.arg1()?)?,
            CommandType::Push => {
                writer.write_push_pop("push", parser.arg1()?, parser.arg2()?)?;
            }
            CommandType::Pop => {
                writer.write_push_pop("pop", parser.arg1()?, parser.arg2()?)?;
            }
            CommandType::Label => writer.write_label(parser.arg1()?)?,
            CommandType::Goto => writer.write_goto(parser.arg1()?)?,
            CommandType::If => writer.write_if_goto(parser.arg1()?)?,
            CommandType::Function => {
                writer.write_function(parser.arg1()?, parser.arg2()?)?;
            }
            CommandType::Call => writer.write_call(parser.arg1()?, parser.arg2()?)?,
            CommandType::Return => writer.write_return()?,
        }
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let input = Path::new(&cli.path);
    let (files, output, do_bootstrap) = plan(input)?;

    if files.is_empty() {
        return Err(TranslateError::MalformedCommand(format!(
            "no .vm files found in {}",
            input.display()
        )));
    }

    let mut writer = CodeWriter::new(output.to_str().unwrap_or("out.asm"))?;

    if do_bootstrap {
        info!("emitting bootstrap sequence");
        writer.write_bootstrap()?;
    }

    for file in &files {
        info!("translating {}", file.display());
        translate_file(file, &mut writer)?;
    }

    writer.close()?;
    println!("Translation complete: {} -> {}", input.display(), output.display());
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
    fn single_file_does_not_bootstrap() {
        let tmp = tempfile::NamedTempFile::with_suffix(".vm").unwrap();
        let (files, output, bootstrap) = plan(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().to_path_buf()]);
        assert!(!bootstrap);
        assert_eq!(output.extension().unwrap(), "asm");
    }

    #[test]
    fn directory_mode_orders_sys_vm_first() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Main.vm"), "push constant 1\n").unwrap();
        std::fs::write(dir.path().join("Sys.vm"), "push constant 2\n").unwrap();

        let (files, output, bootstrap) = plan(dir.path()).unwrap();
        assert!(bootstrap);
        assert_eq!(files[0].file_name().unwrap(), "Sys.vm");
        assert!(output.to_string_lossy().ends_with(".asm"));
    }
}
