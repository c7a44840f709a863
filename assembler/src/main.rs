//! Hack Assembler - Main Entry Point
//!
//! A two-pass assembler for the Hack assembly language (`Nand2Tetris` Project 6).
//!
//! # Architecture
//! - **Pass 1**: Builds the symbol table by recording label positions
//! - **Pass 2**: Generates machine code, resolving all symbols

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::process;

use clap::Parser as ClapParser;
use log::info;

mod code;
mod parser;
mod symbol_table;

use parser::{CommandType, ParserError, ParserLines};
use symbol_table::SymbolTable;

type Result<T> = std::result::Result<T, ParserError>;

/// Translates symbolic Hack assembly (`.asm`) into 16-bit binary machine code (`.hack`).
#[derive(clap::Parser)]
struct Cli {
    /// Input assembly file
    input: String,
    /// Output file (defaults to the input path with `.asm` replaced by `.hack`)
    output: Option<String>,
}

/// Reads assembly file into memory
fn read_lines(path: &str) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(Into::into)
}

/// First pass: Build symbol table with label addresses
///
/// Scans through all lines and records the ROM address of each label.
/// Label definitions (L-commands) don't generate code, so they don't
/// increment the ROM address counter.
fn first_pass(lines: &[String], symbol_table: &mut SymbolTable) -> Result<()> {
    let mut rom_address = 0u16;
    let mut parser = ParserLines::from_lines(lines);

    while parser.advance() {
        match parser.command_type()? {
            CommandType::LCommand => {
                // Labels mark the next instruction's address
                let symbol = parser.symbol()?;
                if symbol_table.contains(symbol) {
                    return Err(ParserError::DuplicateLabel {
                        label: symbol.to_string(),
                    });
                }
                symbol_table.add_entry(symbol, rom_address);
            }
            CommandType::ACommand | CommandType::CCommand => {
                // Actual instructions increment the address
                rom_address += 1;
            }
        }
    }

    Ok(())
}

/// Second pass: Generate machine code
///
/// Translates each instruction to binary:
/// - A-commands: Resolve symbols to addresses, rejecting values over 32767
/// - C-commands: Encode dest, comp, and jump fields
/// - L-commands: Skip (already processed in pass 1)
fn second_pass(
    lines: &[String],
    symbol_table: &mut SymbolTable,
    writer: &mut BufWriter<File>,
) -> Result<()> {
    let mut ram_address = 16u16; // Variables start at RAM[16]
    let mut parser = ParserLines::from_lines(lines);
    let mut emitted = 0u32;

    while parser.advance() {
        match parser.command_type()? {
            CommandType::ACommand => {
                let symbol = parser.symbol()?;

                // Try to parse as number first, then lookup/insert as symbol
                let address = if let Ok(value) = symbol.parse::<u32>() {
                    if value > 32767 {
                        return Err(ParserError::AddressOverflow { value });
                    }
                    u16::try_from(value).expect("checked above")
                } else {
                    symbol_table.get_or_insert(symbol, &mut ram_address)
                };

                let instruction = code::encode_a_instruction(address);
                writeln!(writer, "{instruction}")?;
                emitted += 1;
            }
            CommandType::CCommand => {
                let dest = parser.dest()?.unwrap_or("");
                let comp = parser.comp()?.unwrap_or("");
                let jump = parser.jump()?.unwrap_or("");

                let (dest_ok, comp_ok, jump_ok) = code::validate_mnemonics(dest, comp, jump);
                if !(dest_ok && comp_ok && jump_ok) {
                    return Err(ParserError::UnknownMnemonic {
                        mnemonic: format!("{dest}={comp};{jump}"),
                    });
                }

                let instruction = code::encode_c_instruction(dest, comp, jump);
                writeln!(writer, "{instruction}")?;
                emitted += 1;
            }
            CommandType::LCommand => {}
        }
    }

    writer.flush()?;
    info!("emitted {emitted} instructions");
    Ok(())
}

/// Determines the output file path
fn output_path(input: &str, explicit_output: Option<&str>) -> String {
    explicit_output.map_or_else(
        || input.replace(".asm", ".hack"),
        std::string::ToString::to_string,
    )
}

fn run(cli: &Cli) -> Result<()> {
    let lines = read_lines(&cli.input)?;

    let mut symbol_table = SymbolTable::new();

    info!("pass 1: indexing labels in {}", cli.input);
    first_pass(&lines, &mut symbol_table)?;

    let output = output_path(&cli.input, cli.output.as_deref());
    let output_file = File::create(&output)?;
    let mut writer = BufWriter::new(output_file);

    info!("pass 2: generating machine code -> {output}");
    second_pass(&lines, &mut symbol_table, &mut writer)?;

    println!("Assembly completed. Output written to {output}");
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
