//! Emits Jack VM command text, one command per line.
//!
//! Mirrors `vmtranslator::CodeWriter`'s shape (a buffered writer plus one
//! method per VM command) but targets VM source text instead of assembly.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::errors::Result;

pub struct VmWriter {
    output: BufWriter<File>,
}

impl VmWriter {
    pub fn new(output_path: &str) -> Result<Self> {
        let file = File::create(output_path)?;
        Ok(Self {
            output: BufWriter::new(file),
        })
    }

    pub fn write_push(&mut self, segment: &str, index: u16) -> Result<()> {
        writeln!(self.output, "push {segment} {index}")?;
        Ok(())
    }

    pub fn write_pop(&mut self, segment: &str, index: u16) -> Result<()> {
        writeln!(self.output, "pop {segment} {index}")?;
        Ok(())
    }

    pub fn write_arithmetic(&mut self, command: &str) -> Result<()> {
        writeln!(self.output, "{command}")?;
        Ok(())
    }

    pub fn write_label(&mut self, label: &str) -> Result<()> {
        writeln!(self.output, "label {label}")?;
        Ok(())
    }

    pub fn write_goto(&mut self, label: &str) -> Result<()> {
        writeln!(self.output, "goto {label}")?;
        Ok(())
    }

    pub fn write_if_goto(&mut self, label: &str) -> Result<()> {
        writeln!(self.output, "if-goto {label}")?;
        Ok(())
    }

    pub fn write_call(&mut self, name: &str, n_args: u16) -> Result<()> {
        writeln!(self.output, "call {name} {n_args}")?;
        Ok(())
    }

    pub fn write_function(&mut self, name: &str, n_vars: u16) -> Result<()> {
        writeln!(self.output, "function {name} {n_vars}")?;
        Ok(())
    }

    pub fn write_return(&mut self) -> Result<()> {
        writeln!(self.output, "return")?;
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn emits_one_command_per_line() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().to_str().unwrap().to_string();

        let mut writer = VmWriter::new(&path).unwrap();
        writer.write_push("constant", 7).unwrap();
        writer.write_call("Math.sqrt", 1).unwrap();
        writer.write_return().unwrap();
        writer.close().unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "push constant 7\ncall Math.sqrt 1\nreturn\n");
    }
}
