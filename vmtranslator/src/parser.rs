use std::fs::File;
use std::io::{BufRead, BufReader};

use crate::errors::{Result, TranslateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Arithmetic,
    Push,
    Pop,
    Label,
    Goto,
    If,
    Function,
    Return,
    Call,
}

pub struct Parser {
    lines: Vec<String>,
    current_line: usize,
    current_command: String,
    /// Cached parts of the current command to avoid repeated parsing
    cached_parts: Vec<String>,
}

impl Parser {
    pub fn new(filename: &str) -> Result<Self> {
        let file = File::open(filename)?;
        let reader = BufReader::new(file);

        let mut lines = Vec::new();
        for line in reader.lines() {
            let line = line?;
            // Remove comments and whitespace
            let line = if let Some(pos) = line.find("//") {
                &line[..pos]
            } else {
                &line
            };

            let trimmed = line.trim();

            // Skip empty lines
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
        }

        Ok(Parser {
            lines,
            current_line: 0,
            current_command: String::new(),
            cached_parts: Vec::new(),
        })
    }

    #[inline]
    pub fn has_more_commands(&self) -> bool {
        self.current_line < self.lines.len()
    }

    #[inline]
    pub fn advance(&mut self) {
        if self.has_more_commands() {
            // Use swap to avoid allocation
            std::mem::swap(
                &mut self.current_command,
                &mut self.lines[self.current_line],
            );

            // Parse and cache command parts once
            self.cached_parts.clear();
            self.cached_parts.extend(
                self.current_command
                    .split_whitespace()
                    .map(|s| s.to_string()),
            );

            self.current_line += 1;
        }
    }

    #[inline]
    pub fn command_type(&self) -> Result<CommandType> {
        let first = self
            .cached_parts
            .first()
            .ok_or_else(|| TranslateError::MalformedCommand(self.current_command.clone()))?;

        Ok(match first.as_str() {
            "push" => CommandType::Push,
            "pop" => CommandType::Pop,
            "label" => CommandType::Label,
            "goto" => CommandType::Goto,
            "if-goto" => CommandType::If,
            "function" => CommandType::Function,
            "return" => CommandType::Return,
            "call" => CommandType::Call,
            _ => CommandType::Arithmetic,
        })
    }

    #[inline]
    pub fn arg1(&self) -> Result<&str> {
        match self.command_type()? {
            CommandType::Arithmetic => Ok(&self.cached_parts[0]),
            CommandType::Return => Err(TranslateError::MalformedCommand(
                "arg1 is not defined for return".to_string(),
            )),
            _ => self.cached_parts.get(1).map(String::as_str).ok_or_else(|| {
                TranslateError::MalformedCommand(self.current_command.clone())
            }),
        }
    }

    #[inline]
    pub fn arg2(&self) -> Result<i32> {
        match self.command_type()? {
            CommandType::Push | CommandType::Pop | CommandType::Function | CommandType::Call => {
                let raw = self
                    .cached_parts
                    .get(2)
                    .ok_or_else(|| TranslateError::MalformedCommand(self.current_command.clone()))?;
                raw.parse()
                    .map_err(|_| TranslateError::MalformedCommand(self.current_command.clone()))
            }
            _ => Err(TranslateError::MalformedCommand(
                "arg2 is not defined for this command type".to_string(),
            )),
        }
    }
}
