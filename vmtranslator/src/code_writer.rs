use std::fs::File;
use std::io::{BufWriter, Write};

use crate::errors::{Result, TranslateError};

macro_rules! write_asm {
    ($writer:expr, $($line:literal)*) => {
        $writer.write_all(concat!($($line, "\n"),*).as_bytes()).map_err(TranslateError::from)
    };
}

#[derive(Clone, Copy)]
enum SegmentSymbol {
    Local,
    Argument,
    This,
    That,
    Temp,
    Pointer,
    Static,
    Constant,
}

impl SegmentSymbol {
    fn from_str(segment: &str) -> Option<Self> {
        match segment {
            "local" => Some(SegmentSymbol::Local),
            "argument" => Some(SegmentSymbol::Argument),
            "this" => Some(SegmentSymbol::This),
            "that" => Some(SegmentSymbol::That),
            "temp" => Some(SegmentSymbol::Temp),
            "pointer" => Some(SegmentSymbol::Pointer),
            "static" => Some(SegmentSymbol::Static),
            "constant" => Some(SegmentSymbol::Constant),
            _ => None,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            SegmentSymbol::Local => "LCL",
            SegmentSymbol::Argument => "ARG",
            SegmentSymbol::This => "THIS",
            SegmentSymbol::That => "THAT",
            SegmentSymbol::Temp => "R5",
            SegmentSymbol::Pointer => "THIS", // Special case handled separately
            SegmentSymbol::Static => "STATIC", // Special case handled separately
            SegmentSymbol::Constant => "CONSTANT", // Special case handled separately
        }
    }
}

/// Writes Hack assembly for a stream of VM commands.
///
/// Labels emitted by `write_label`/`write_goto`/`write_if_goto` are scoped to
/// the most recently entered function (`f$label`), matching the VM
/// specification's requirement that labels are visible only inside the
/// function that defines them. `write_call` mints a fresh `f$ret.k` label per
/// call site using a monotonic counter so that recursive/repeated calls to
/// the same function never collide.
pub struct CodeWriter {
    output_file: BufWriter<File>,
    label_counter: usize,
    call_counter: usize,
    filename: String,
    current_function: String,
}

impl CodeWriter {
    pub fn new(output_filename: &str) -> Result<Self> {
        let file = File::create(output_filename)?;
        let buffered = BufWriter::with_capacity(8192, file);
        Ok(CodeWriter {
            output_file: buffered,
            label_counter: 0,
            call_counter: 0,
            filename: String::new(),
            current_function: String::from("Sys"),
        })
    }

    #[inline]
    pub fn set_filename(&mut self, filename: &str) {
        let name = std::path::Path::new(filename)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unknown");
        self.filename.clear();
        self.filename.push_str(name);
    }

    /// Emits `SP=256` followed by a call to `Sys.init`, as every directory
    /// translation unit's entry point.
    pub fn write_bootstrap(&mut self) -> Result<()> {
        write!(self.output_file, "@256\nD=A\n@SP\nM=D\n")?;
        self.write_call("Sys.init", 0)
    }

    pub fn write_arithmetic(&mut self, command: &str) -> Result<()> {
        writeln!(self.output_file, "// vm command:{command}")?;

        match command {
            "add" => self.write_binary_op("D+M"),
            "sub" => self.write_binary_op("D-M"),
            "and" => self.write_binary_op("D&M"),
            "or" => self.write_binary_op("D|M"),
            "neg" => self.write_unary_op(true),
            "not" => self.write_unary_op(false),
            "eq" => self.write_comparison("JEQ"),
            "gt" => self.write_comparison("JGT"),
            "lt" => self.write_comparison("JLT"),
            _ => Err(TranslateError::UnknownArithmetic(command.to_string())),
        }
    }

    #[inline]
    fn write_binary_op(&mut self, operation: &str) -> Result<()> {
        write!(
            self.output_file,
            "// get the top element of stack\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             // store the result temporarily\n\
             @R14\n\
             M=D\n\
             // get the top element of stack\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             // store the result temporarily\n\
             @R13\n\
             M=D\n\
             @R13\n\
             D=M\n\
             @R14\n\
             D={operation}\n"
        )?;

        self.write_push_d()?;
        self.output_file.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_unary_op(&mut self, is_neg: bool) -> Result<()> {
        write_asm!(self.output_file,
            "// get the top element of stack"
            "@SP"
            "M=M-1"
            "A=M"
            "D=M"
        )?;

        if is_neg {
            write_asm!(self.output_file,
                "@0"
                "D=A-D"
            )?;
        } else {
            write_asm!(self.output_file, "D=!D")?;
        }

        self.write_push_d()?;
        self.output_file.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_comparison(&mut self, jump: &str) -> Result<()> {
        let label_prefix = match jump {
            "JEQ" => "EQ",
            "JGT" => "GT",
            "JLT" => "LT",
            _ => jump,
        };
        let label_num = self.label_counter;
        self.label_counter += 1;

        write!(
            self.output_file,
            "// get the top element of stack\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             // store the result temporarily\n\
             @R14\n\
             M=D\n\
             // get the top element of stack\n\
             @SP\n\
             M=M-1\n\
             A=M\n\
             D=M\n\
             // store the result temporarily\n\
             @R13\n\
             M=D\n\
             @R13\n\
             D=M\n\
             @R14\n\
             D=D-M\n\
             @{label_prefix}{label_num}\n\
             D;{jump}\n\
             // push the value into stack\n\
             @SP\n\
             A=M\n\
             M=0\n\
             @SP\n\
             M=M+1\n\
             @END{label_prefix}{label_num}\n\
             0;JMP\n\
             ({label_prefix}{label_num})\n\
             // push the value into stack\n\
             @SP\n\
             A=M\n\
             M=-1\n\
             @SP\n\
             M=M+1\n\
             (END{label_prefix}{label_num})\n\n"
        )?;
        Ok(())
    }

    pub fn write_push_pop(&mut self, command: &str, segment: &str, index: i32) -> Result<()> {
        writeln!(self.output_file, "// vm command:{command} {segment} {index}")?;

        if command == "push" {
            self.write_push(segment, index)?;
        } else if command == "pop" {
            self.write_pop(segment, index)?;
        }

        self.output_file.write_all(b"\n")?;
        Ok(())
    }

    #[inline]
    fn write_push(&mut self, segment: &str, index: i32) -> Result<()> {
        match SegmentSymbol::from_str(segment) {
            Some(SegmentSymbol::Constant) => {
                write!(self.output_file, "@{index}\nD=A\n")?;
                self.write_push_d()
            }
            Some(seg)
                if matches!(
                    seg,
                    SegmentSymbol::Local
                        | SegmentSymbol::Argument
                        | SegmentSymbol::This
                        | SegmentSymbol::That
                ) =>
            {
                let segment_symbol = seg.symbol();
                write!(
                    self.output_file,
                    "@{segment_symbol}\nD=M\n@{index}\nA=D+A\nD=M\n"
                )?;
                self.write_push_d()
            }
            Some(SegmentSymbol::Temp) => {
                write!(self.output_file, "@R5\nD=A\n@{index}\nA=D+A\nD=M\n")?;
                self.write_push_d()
            }
            Some(SegmentSymbol::Pointer) => {
                self.check_pointer_index(index)?;
                write!(self.output_file, "@THIS\nD=A\n@{index}\nA=D+A\nD=M\n")?;
                self.write_push_d()
            }
            Some(SegmentSymbol::Static) => {
                write!(self.output_file, "@{}.{index}\nD=M\n", self.filename)?;
                self.write_push_d()
            }
            _ => Err(TranslateError::UnknownSegment(segment.to_string())),
        }
    }

    #[inline]
    fn write_pop(&mut self, segment: &str, index: i32) -> Result<()> {
        match SegmentSymbol::from_str(segment) {
            Some(seg)
                if matches!(
                    seg,
                    SegmentSymbol::Local
                        | SegmentSymbol::Argument
                        | SegmentSymbol::This
                        | SegmentSymbol::That
                ) =>
            {
                let segment_symbol = seg.symbol();
                write!(
                    self.output_file,
                    "@{segment_symbol}\n\
                     D=M\n\
                     @{index}\n\
                     D=D+A\n\
                     // store the result temporarily\n\
                     @R13\n\
                     M=D\n"
                )?;

                self.write_pop_to_d()?;

                write_asm!(self.output_file,
                    "// store the top value"
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Some(SegmentSymbol::Temp) => {
                write!(
                    self.output_file,
                    "@5\n\
                     D=A\n\
                     @{index}\n\
                     D=D+A\n\
                     // store the result temporarily\n\
                     @R13\n\
                     M=D\n"
                )?;

                self.write_pop_to_d()?;

                write_asm!(self.output_file,
                    "// store the top value"
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Some(SegmentSymbol::Pointer) => {
                self.check_pointer_index(index)?;
                write!(
                    self.output_file,
                    "@THIS\n\
                     D=A\n\
                     @{index}\n\
                     D=D+A\n\
                     // store the result temporarily\n\
                     @R13\n\
                     M=D\n"
                )?;

                self.write_pop_to_d()?;

                write_asm!(self.output_file,
                    "// store the top value"
                    "@R13"
                    "A=M"
                    "M=D"
                )?;
                Ok(())
            }
            Some(SegmentSymbol::Static) => {
                self.write_pop_to_d()?;
                write!(self.output_file, "@{}.{index}\nM=D\n", self.filename)?;
                Ok(())
            }
            _ => Err(TranslateError::UnknownSegment(segment.to_string())),
        }
    }

    fn check_pointer_index(&self, index: i32) -> Result<()> {
        if index == 0 || index == 1 {
            Ok(())
        } else {
            Err(TranslateError::SegmentIndexOutOfRange {
                segment: "pointer".to_string(),
                index,
            })
        }
    }

    #[inline]
    fn write_push_d(&mut self) -> Result<()> {
        write_asm!(self.output_file,
            "// push the value into stack"
            "@SP"
            "A=M"
            "M=D"
            "@SP"
            "M=M+1"
        )
    }

    #[inline]
    fn write_pop_to_d(&mut self) -> Result<()> {
        write_asm!(self.output_file,
            "// get the top element of stack"
            "@SP"
            "M=M-1"
            "A=M"
            "D=M"
        )
    }

    /// `(function$label)` — scoped to the function currently being written.
    pub fn write_label(&mut self, label: &str) -> Result<()> {
        writeln!(self.output_file, "({}${label})", self.current_function)?;
        Ok(())
    }

    pub fn write_goto(&mut self, label: &str) -> Result<()> {
        writeln!(self.output_file, "@{}${label}\n0;JMP", self.current_function)?;
        Ok(())
    }

    pub fn write_if_goto(&mut self, label: &str) -> Result<()> {
        self.write_pop_to_d()?;
        writeln!(self.output_file, "@{}${label}\nD;JNE", self.current_function)?;
        Ok(())
    }

    /// `(name)` followed by `n_vars` zero-initialized locals pushed onto the
    /// stack. Enters `name` as the current label scope for subsequent
    /// `write_label`/`write_goto`/`write_if_goto` calls.
    pub fn write_function(&mut self, name: &str, n_vars: i32) -> Result<()> {
        self.current_function.clear();
        self.current_function.push_str(name);

        writeln!(self.output_file, "({name})")?;
        if n_vars > 0 {
            write!(
                self.output_file,
                "@{n_vars}\n\
                 D=A\n\
                 ({name}_rep)\n\
                 @SP\n\
                 AM=M+1\n\
                 A=A-1\n\
                 M=0\n\
                 @{name}_rep\n\
                 D=D-1;JGT\n"
            )?;
        }
        Ok(())
    }

    /// Pushes a five-word saved frame (retAddr, LCL, ARG, THIS, THAT), then
    /// repositions ARG/LCL for the callee and jumps to it. `name$ret.k` is
    /// unique per call site via a monotonic counter on this writer.
    pub fn write_call(&mut self, name: &str, n_args: i32) -> Result<()> {
        let return_label = format!("{name}$ret.{}", self.call_counter);
        self.call_counter += 1;

        write!(
            self.output_file,
            "@{return_label}\n\
             D=A\n\
             @SP\n\
             AM=M+1\n\
             A=A-1\n\
             M=D\n\
             @LCL\n\
             D=M\n\
             @SP\n\
             AM=M+1\n\
             A=A-1\n\
             M=D\n\
             @ARG\n\
             D=M\n\
             @SP\n\
             AM=M+1\n\
             A=A-1\n\
             M=D\n\
             @THIS\n\
             D=M\n\
             @SP\n\
             AM=M+1\n\
             A=A-1\n\
             M=D\n\
             @THAT\n\
             D=M\n\
             @SP\n\
             AM=M+1\n\
             A=A-1\n\
             M=D\n\
             @SP\n\
             D=M\n\
             @LCL\n\
             M=D\n\
             @5\n\
             D=D-A\n\
             @{n_args}\n\
             D=D-A\n\
             @ARG\n\
             M=D\n\
             @{name}\n\
             0;JMP\n\
             ({return_label})\n"
        )?;
        Ok(())
    }

    /// Restores the caller's frame from the five saved words below `LCL` and
    /// jumps back, using `R13`/`R14` as scratch for the saved frame pointer
    /// and return address.
    pub fn write_return(&mut self) -> Result<()> {
        write!(
            self.output_file,
            "@LCL\n\
             D=M\n\
             @R13\n\
             M=D\n\
             @5\n\
             A=D-A\n\
             D=M\n\
             @R14\n\
             M=D\n\
             @SP\n\
             AM=M-1\n\
             D=M\n\
             @ARG\n\
             A=M\n\
             M=D\n\
             @ARG\n\
             D=M\n\
             @SP\n\
             M=D+1\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @THAT\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @THIS\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @ARG\n\
             M=D\n\
             @R13\n\
             AM=M-1\n\
             D=M\n\
             @LCL\n\
             M=D\n\
             @R14\n\
             A=M\n\
             0;JMP\n"
        )?;
        Ok(())
    }

    #[inline]
    pub fn close(&mut self) -> Result<()> {
        self.output_file.flush().map_err(TranslateError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn written(mut f: impl FnMut(&mut CodeWriter) -> Result<()>) -> String {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().to_str().unwrap().to_string();
        let mut writer = CodeWriter::new(&path).unwrap();
        f(&mut writer).unwrap();
        writer.close().unwrap();

        let mut contents = String::new();
        File::open(&path).unwrap().read_to_string(&mut contents).unwrap();
        contents
    }

    #[test]
    fn unknown_arithmetic_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut writer = CodeWriter::new(tmp.path().to_str().unwrap()).unwrap();
        assert!(writer.write_arithmetic("xor").is_err());
    }

    #[test]
    fn unknown_segment_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut writer = CodeWriter::new(tmp.path().to_str().unwrap()).unwrap();
        assert!(writer.write_push_pop("push", "nonsense", 0).is_err());
    }

    #[test]
    fn pointer_index_out_of_range_is_an_error() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut writer = CodeWriter::new(tmp.path().to_str().unwrap()).unwrap();
        assert!(writer.write_push_pop("push", "pointer", 2).is_err());
    }

    #[test]
    fn labels_are_scoped_to_the_current_function() {
        let out = written(|w| {
            w.write_function("Foo.bar", 0)?;
            w.write_label("LOOP")?;
            w.write_goto("LOOP")
        });
        assert!(out.contains("(Foo.bar$LOOP)"));
        assert!(out.contains("@Foo.bar$LOOP"));
    }

    #[test]
    fn call_sites_get_distinct_return_labels() {
        let out = written(|w| {
            w.write_call("Foo.bar", 2)?;
            w.write_call("Foo.bar", 2)
        });
        assert!(out.contains("(Foo.bar$ret.0)"));
        assert!(out.contains("(Foo.bar$ret.1)"));
    }

    #[test]
    fn bootstrap_sets_sp_then_calls_sys_init() {
        let out = written(CodeWriter::write_bootstrap);
        assert!(out.starts_with("@256\nD=A\n@SP\nM=D\n"));
        assert!(out.contains("@Sys.init"));
        assert!(out.contains("(Sys.init$ret.0)"));
    }
}
