//! VM Translator for the `Nand2Tetris` course
//!
//! Translates the stack-based VM intermediate language into Hack assembly.
//!
//! # Architecture
//!
//! - [`parser`]: Reads `.vm` commands, classifying and splitting each into
//!   its command type and arguments.
//! - [`code_writer`]: Emits Hack assembly for arithmetic, memory-segment
//!   access, branching, and the function call/return protocol.
//! - [`errors`]: The fatal, first-error-stops error taxonomy shared by both.
//!
//! # Example
//!
//! ```rust
//! use vmtranslator::code_writer::CodeWriter;
//! use std::io::Read;
//!
//! let tmp = tempfile::NamedTempFile::new().unwrap();
//! let path = tmp.path().to_str().unwrap().to_string();
//! let mut writer = CodeWriter::new(&path).unwrap();
//! writer.write_push_pop("push", "constant", 7).unwrap();
//! writer.close().unwrap();
//!
//! let mut contents = String::new();
//! std::fs::File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
//! assert!(contents.contains("@7"));
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod code_writer;
pub mod errors;
pub mod parser;

pub use code_writer::CodeWriter;
pub use errors::{Result, TranslateError};
pub use parser::{CommandType, Parser};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_a_small_arithmetic_program() {
        use std::io::{Read, Write};

        let mut vm_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(vm_file, "push constant 7").unwrap();
        writeln!(vm_file, "push constant 8").unwrap();
        writeln!(vm_file, "add").unwrap();
        vm_file.flush().unwrap();

        let asm_path = tempfile::NamedTempFile::new().unwrap();
        let asm_path = asm_path.path().to_str().unwrap().to_string();

        let mut parser = Parser::new(vm_file.path().to_str().unwrap()).unwrap();
        let mut writer = CodeWriter::new(&asm_path).unwrap();
        writer.set_filename("Main");

        while parser.has_more_commands() {
            parser.advance();
            match parser.command_type().unwrap() {
                CommandType::Arithmetic => {
                    writer.write_arithmetic(parser.arg1().unwrap()).unwrap();
                }
                CommandType::Push | CommandType::Pop => {
                    let cmd = if parser.command_type().unwrap() == CommandType::Push {
                        "push"
                    } else {
                        "pop"
                    };
                    writer
                        .write_push_pop(cmd, parser.arg1().unwrap(), parser.arg2().unwrap())
                        .unwrap();
                }
                _ => unreachable!(),
            }
        }
        writer.close().unwrap();

        let mut asm = String::new();
        std::fs::File::open(&asm_path)
            .unwrap()
            .read_to_string(&mut asm)
            .unwrap();
        assert!(asm.contains("@7"));
        assert!(asm.contains("@8"));
        assert!(asm.contains("D+M"));
    }
}
