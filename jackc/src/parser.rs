//! Recursive-descent parser and syntax-directed code generator for Jack.
//!
//! There is exactly one grammar walk, shared by both compiler passes: when
//! constructed without a [`VmWriter`] it only builds symbol tables (pass 1,
//! see [`index_class`]); when constructed with one it additionally emits VM
//! code, resolving identifiers against the [`ClassInfo`] map pass 1 built for
//! every class (pass 2, see [`compile_class`]). This is the same shape as
//! the reference compiler's single traversal gated by a flag, made explicit
//! by threading `Option<&mut VmWriter>` instead of a boolean.

use std::collections::HashMap;

use crate::class_info::{ClassInfo, SubroutineDescriptor, SubroutineKind};
use crate::errors::{CompileError, Result};
use crate::symbol_table::{Kind, SymbolTable};
use crate::tokenizer::{Keyword, Token};
use crate::vm_writer::VmWriter;

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,

    class_name: String,
    class_table: SymbolTable,
    subroutines: HashMap<String, SubroutineDescriptor>,

    current_subrt_table: SymbolTable,
    if_cnt: u32,
    while_cnt: u32,

    writer: Option<&'a mut VmWriter>,
    class_infos: Option<&'a HashMap<String, ClassInfo>>,
}

impl<'a> Parser<'a> {
    fn new(
        tokens: &'a [Token],
        writer: Option<&'a mut VmWriter>,
        class_infos: Option<&'a HashMap<String, ClassInfo>>,
    ) -> Self {
        Self {
            tokens,
            pos: 0,
            class_name: String::new(),
            class_table: SymbolTable::new(),
            subroutines: HashMap::new(),
            current_subrt_table: SymbolTable::new(),
            if_cnt: 0,
            while_cnt: 0,
            writer,
            class_infos,
        }
    }

    fn is_emitting(&self) -> bool {
        self.writer.is_some()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn peek_symbol(&self, c: char) -> bool {
        matches!(self.peek(), Some(Token::Symbol(s)) if *s == c)
    }

    fn peek_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek(), Some(Token::Keyword(k)) if *k == kw)
    }

    fn expect_symbol(&mut self, c: char) -> Result<()> {
        if self.peek_symbol(c) {
            self.advance();
            Ok(())
        } else {
            Err(CompileError::Parse {
                expected: format!("`{c}`"),
                found: format!("{:?}", self.peek()),
            })
        }
    }

    fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        if self.peek_keyword(kw) {
            self.advance();
            Ok(())
        } else {
            Err(CompileError::Parse {
                expected: format!("`{}`", kw.as_str()),
                found: format!("{:?}", self.peek()),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.peek().cloned() {
            Some(Token::Identifier(name)) => {
                self.advance();
                Ok(name)
            }
            other => Err(CompileError::Parse {
                expected: "identifier".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn peek_is_type(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Keyword(Keyword::Int))
                | Some(Token::Keyword(Keyword::Char))
                | Some(Token::Keyword(Keyword::Boolean))
                | Some(Token::Identifier(_))
        )
    }

    fn parse_type(&mut self) -> Result<String> {
        match self.peek().cloned() {
            Some(Token::Keyword(Keyword::Int)) => {
                self.advance();
                Ok("int".to_string())
            }
            Some(Token::Keyword(Keyword::Char)) => {
                self.advance();
                Ok("char".to_string())
            }
            Some(Token::Keyword(Keyword::Boolean)) => {
                self.advance();
                Ok("boolean".to_string())
            }
            Some(Token::Identifier(name)) => {
                self.advance();
                Ok(name)
            }
            other => Err(CompileError::Parse {
                expected: "type name".to_string(),
                found: format!("{other:?}"),
            }),
        }
    }

    fn class_table_ref(&self) -> &SymbolTable {
        match self.class_infos {
            Some(infos) => &infos[&self.class_name].class_table,
            None => &self.class_table,
        }
    }

    fn define_class_var(&mut self, name: &str, var_type: &str, kind: Kind) {
        if !self.is_emitting() {
            self.class_table.define(name, var_type, kind);
        }
    }

    fn define_subrt_var(&mut self, name: &str, var_type: &str, kind: Kind) {
        if !self.is_emitting() {
            self.current_subrt_table.define(name, var_type, kind);
        }
    }

    fn resolve_var(&self, name: &str) -> Result<(&'static str, u16)> {
        if let Some(entry) = self.current_subrt_table.get(name) {
            return Ok((entry.kind.segment(), entry.index));
        }
        if let Some(entry) = self.class_table_ref().get(name) {
            return Ok((entry.kind.segment(), entry.index));
        }
        Err(CompileError::Name {
            identifier: name.to_string(),
        })
    }

    fn lookup_var_type(&self, name: &str) -> Option<String> {
        self.current_subrt_table
            .type_of(name)
            .or_else(|| self.class_table_ref().type_of(name))
            .map(str::to_string)
    }

    fn fn_kind_of(&self, class_name: &str, method_name: &str) -> SubroutineKind {
        self.class_infos
            .and_then(|infos| infos.get(class_name))
            .and_then(|ci| ci.subroutines.get(method_name))
            .map_or(SubroutineKind::Function, |d| d.kind)
    }

    // --- emission (no-ops during the indexing pass) ---

    fn emit_push(&mut self, segment: &str, index: u16) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_push(segment, index),
            None => Ok(()),
        }
    }

    fn emit_pop(&mut self, segment: &str, index: u16) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_pop(segment, index),
            None => Ok(()),
        }
    }

    fn emit_arithmetic(&mut self, command: &str) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_arithmetic(command),
            None => Ok(()),
        }
    }

    fn emit_label(&mut self, label: &str) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_label(label),
            None => Ok(()),
        }
    }

    fn emit_goto(&mut self, label: &str) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_goto(label),
            None => Ok(()),
        }
    }

    fn emit_if_goto(&mut self, label: &str) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_if_goto(label),
            None => Ok(()),
        }
    }

    fn emit_call(&mut self, name: &str, n_args: u16) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_call(name, n_args),
            None => Ok(()),
        }
    }

    fn emit_function(&mut self, name: &str, n_vars: u16) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_function(name, n_vars),
            None => Ok(()),
        }
    }

    fn emit_return(&mut self) -> Result<()> {
        match &mut self.writer {
            Some(w) => w.write_return(),
            None => Ok(()),
        }
    }

    // --- grammar ---

    fn compile_class(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        while self.peek_keyword(Keyword::Static) || self.peek_keyword(Keyword::Field) {
            self.compile_class_var_dec()?;
        }

        while matches!(
            self.peek(),
            Some(Token::Keyword(Keyword::Constructor))
                | Some(Token::Keyword(Keyword::Function))
                | Some(Token::Keyword(Keyword::Method))
        ) {
            self.compile_subroutine()?;
        }

        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_class_var_dec(&mut self) -> Result<()> {
        let kind = if self.peek_keyword(Keyword::Static) {
            self.advance();
            Kind::Static
        } else {
            self.expect_keyword(Keyword::Field)?;
            Kind::Field
        };

        let var_type = self.parse_type()?;
        let name = self.expect_identifier()?;
        self.define_class_var(&name, &var_type, kind);

        while self.peek_symbol(',') {
            self.advance();
            let name = self.expect_identifier()?;
            self.define_class_var(&name, &var_type, kind);
        }

        self.expect_symbol(';')?;
        Ok(())
    }

    fn compile_subroutine(&mut self) -> Result<()> {
        let kind = match self.peek().cloned() {
            Some(Token::Keyword(Keyword::Constructor)) => SubroutineKind::Constructor,
            Some(Token::Keyword(Keyword::Function)) => SubroutineKind::Function,
            Some(Token::Keyword(Keyword::Method)) => SubroutineKind::Method,
            other => {
                return Err(CompileError::Parse {
                    expected: "constructor, function, or method".to_string(),
                    found: format!("{other:?}"),
                })
            }
        };
        self.advance();

        let return_type = if self.peek_keyword(Keyword::Void) {
            self.advance();
            "void".to_string()
        } else {
            self.parse_type()?
        };

        let name = self.expect_identifier()?;

        self.if_cnt = 0;
        self.while_cnt = 0;
        self.current_subrt_table = if let Some(infos) = self.class_infos {
            infos[&self.class_name].subroutines[&name].table.clone()
        } else {
            let mut table = SymbolTable::new();
            if kind == SubroutineKind::Method {
                table.define("this", &self.class_name, Kind::Argument);
            }
            table
        };

        self.expect_symbol('(')?;
        self.compile_parameter_list()?;
        self.expect_symbol(')')?;

        self.expect_symbol('{')?;
        while self.peek_keyword(Keyword::Var) {
            self.compile_var_dec()?;
        }

        if self.is_emitting() {
            let n_locals = self.current_subrt_table.var_count(Kind::Local);
            let full_name = format!("{}.{name}", self.class_name);
            self.emit_function(&full_name, n_locals)?;

            match kind {
                SubroutineKind::Constructor => {
                    let n_fields = self.class_table_ref().var_count(Kind::Field);
                    self.emit_push("constant", n_fields)?;
                    self.emit_call("Memory.alloc", 1)?;
                    self.emit_pop("pointer", 0)?;
                }
                SubroutineKind::Method => {
                    self.emit_push("argument", 0)?;
                    self.emit_pop("pointer", 0)?;
                }
                SubroutineKind::Function => {}
            }
        } else {
            self.subroutines.insert(
                name,
                SubroutineDescriptor {
                    kind,
                    return_type,
                    table: self.current_subrt_table.clone(),
                },
            );
        }

        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }

    fn compile_parameter_list(&mut self) -> Result<()> {
        if !self.peek_is_type() {
            return Ok(());
        }

        loop {
            let var_type = self.parse_type()?;
            let name = self.expect_identifier()?;
            self.define_subrt_var(&name, &var_type, Kind::Argument);

            if self.peek_symbol(',') {
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    fn compile_var_dec(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Var)?;
        let var_type = self.parse_type()?;

        let name = self.expect_identifier()?;
        self.define_subrt_var(&name, &var_type, Kind::Local);

        while self.peek_symbol(',') {
            self.advance();
            let name = self.expect_identifier()?;
            self.define_subrt_var(&name, &var_type, Kind::Local);
        }

        self.expect_symbol(';')?;
        Ok(())
    }

    fn compile_statements(&mut self) -> Result<()> {
        loop {
            match self.peek() {
                Some(Token::Keyword(Keyword::Let)) => self.compile_let()?,
                Some(Token::Keyword(Keyword::If)) => self.compile_if()?,
                Some(Token::Keyword(Keyword::While)) => self.compile_while()?,
                Some(Token::Keyword(Keyword::Do)) => self.compile_do()?,
                Some(Token::Keyword(Keyword::Return)) => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    fn compile_let(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Let)?;
        let name = self.expect_identifier()?;

        let is_array = self.peek_symbol('[');
        if is_array {
            self.advance();
            self.compile_expression()?;
            self.expect_symbol(']')?;
            let (seg, idx) = self.resolve_var(&name)?;
            self.emit_push(seg, idx)?;
            self.emit_arithmetic("add")?;
        }

        self.expect_symbol('=')?;
        self.compile_expression()?;
        self.expect_symbol(';')?;

        if is_array {
            self.emit_pop("temp", 0)?;
            self.emit_pop("pointer", 1)?;
            self.emit_push("temp", 0)?;
            self.emit_pop("that", 0)?;
        } else {
            let (seg, idx) = self.resolve_var(&name)?;
            self.emit_pop(seg, idx)?;
        }
        Ok(())
    }

    fn compile_if(&mut self) -> Result<()> {
        let n = self.if_cnt;
        self.if_cnt += 1;
        let label_true = format!("IF_TRUE{n}");
        let label_false = format!("IF_FALSE{n}");
        let label_end = format!("IF_END{n}");

        self.expect_keyword(Keyword::If)?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.emit_if_goto(&label_true)?;
        self.emit_goto(&label_false)?;
        self.emit_label(&label_true)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        if self.peek_keyword(Keyword::Else) {
            self.emit_goto(&label_end)?;
            self.emit_label(&label_false)?;
            self.advance();
            self.expect_symbol('{')?;
            self.compile_statements()?;
            self.expect_symbol('}')?;
            self.emit_label(&label_end)?;
        } else {
            self.emit_label(&label_false)?;
        }
        Ok(())
    }

    fn compile_while(&mut self) -> Result<()> {
        let n = self.while_cnt;
        self.while_cnt += 1;
        let label_top = format!("WHILE_EXP{n}");
        let label_end = format!("WHILE_END{n}");

        self.emit_label(&label_top)?;
        self.expect_keyword(Keyword::While)?;
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.emit_arithmetic("not")?;
        self.emit_if_goto(&label_end)?;

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.emit_goto(&label_top)?;
        self.emit_label(&label_end)?;
        Ok(())
    }

    fn compile_do(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.expect_symbol(';')?;
        self.emit_pop("temp", 0)?;
        Ok(())
    }

    fn compile_return(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.peek_symbol(';') {
            self.emit_push("constant", 0)?;
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(';')?;
        self.emit_return()?;
        Ok(())
    }

    fn peek_operator(&self) -> Option<char> {
        match self.peek() {
            Some(Token::Symbol(c))
                if matches!(c, '+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '=') =>
            {
                Some(*c)
            }
            _ => None,
        }
    }

    fn compile_expression(&mut self) -> Result<()> {
        self.compile_term()?;
        while let Some(op) = self.peek_operator() {
            self.advance();
            self.compile_term()?;
            match op {
                '+' => self.emit_arithmetic("add")?,
                '-' => self.emit_arithmetic("sub")?,
                '*' => self.emit_call("Math.multiply", 2)?,
                '/' => self.emit_call("Math.divide", 2)?,
                '&' => self.emit_arithmetic("and")?,
                '|' => self.emit_arithmetic("or")?,
                '<' => self.emit_arithmetic("lt")?,
                '>' => self.emit_arithmetic("gt")?,
                '=' => self.emit_arithmetic("eq")?,
                _ => unreachable!("peek_operator only returns handled operators"),
            }
        }
        Ok(())
    }

    fn compile_expression_list(&mut self) -> Result<u16> {
        let mut count = 0;
        if !self.peek_symbol(')') {
            self.compile_expression()?;
            count += 1;
            while self.peek_symbol(',') {
                self.advance();
                self.compile_expression()?;
                count += 1;
            }
        }
        Ok(count)
    }

    fn compile_term(&mut self) -> Result<()> {
        match self.peek().cloned() {
            Some(Token::IntConst(value)) => {
                self.advance();
                self.emit_push("constant", value)?;
            }
            Some(Token::StringConst(s)) => {
                self.advance();
                self.emit_push("constant", s.chars().count() as u16)?;
                self.emit_call("String.new", 1)?;
                for c in s.chars() {
                    self.emit_push("constant", c as u16)?;
                    self.emit_call("String.appendChar", 2)?;
                }
            }
            Some(Token::Keyword(Keyword::True)) => {
                self.advance();
                self.emit_push("constant", 0)?;
                self.emit_arithmetic("not")?;
            }
            Some(Token::Keyword(Keyword::False)) | Some(Token::Keyword(Keyword::Null)) => {
                self.advance();
                self.emit_push("constant", 0)?;
            }
            Some(Token::Keyword(Keyword::This)) => {
                self.advance();
                self.emit_push("pointer", 0)?;
            }
            Some(Token::Identifier(name)) => match self.peek_at(1) {
                Some(Token::Symbol('[')) => {
                    self.advance();
                    self.advance();
                    self.compile_expression()?;
                    self.expect_symbol(']')?;
                    let (seg, idx) = self.resolve_var(&name)?;
                    self.emit_push(seg, idx)?;
                    self.emit_arithmetic("add")?;
                    self.emit_pop("pointer", 1)?;
                    self.emit_push("that", 0)?;
                }
                Some(Token::Symbol('(')) | Some(Token::Symbol('.')) => {
                    self.compile_subroutine_call()?;
                }
                _ => {
                    self.advance();
                    let (seg, idx) = self.resolve_var(&name)?;
                    self.emit_push(seg, idx)?;
                }
            },
            Some(Token::Symbol('(')) => {
                self.advance();
                self.compile_expression()?;
                self.expect_symbol(')')?;
            }
            Some(Token::Symbol(c)) if c == '-' || c == '~' => {
                self.advance();
                self.compile_term()?;
                self.emit_arithmetic(if c == '-' { "neg" } else { "not" })?;
            }
            other => {
                return Err(CompileError::Parse {
                    expected: "term".to_string(),
                    found: format!("{other:?}"),
                })
            }
        }
        Ok(())
    }

    fn compile_subroutine_call(&mut self) -> Result<()> {
        let first = self.expect_identifier()?;

        let (class_name, method_name, is_this_call, receiver) = if self.peek_symbol('.') {
            self.advance();
            let second = self.expect_identifier()?;
            if first == "this" {
                (self.class_name.clone(), second, true, None)
            } else if let Some(var_type) = self.lookup_var_type(&first) {
                let receiver = self.resolve_var(&first)?;
                (var_type, second, false, Some(receiver))
            } else {
                (first, second, false, None)
            }
        } else {
            (self.class_name.clone(), first, true, None)
        };

        let fn_kind = self.fn_kind_of(&class_name, &method_name);

        if fn_kind == SubroutineKind::Method {
            match receiver {
                Some((seg, idx)) => self.emit_push(seg, idx)?,
                None if is_this_call => self.emit_push("pointer", 0)?,
                None => {
                    return Err(CompileError::Name {
                        identifier: class_name,
                    })
                }
            }
        }

        self.expect_symbol('(')?;
        let mut num_args = self.compile_expression_list()?;
        self.expect_symbol(')')?;

        if fn_kind == SubroutineKind::Method {
            num_args += 1;
        }

        let full_name = format!("{class_name}.{method_name}");
        self.emit_call(&full_name, num_args)?;
        Ok(())
    }
}

/// Pass 1: parses one class's tokens, returning its name and the
/// [`ClassInfo`] (class-scope symbol table and every subroutine's signature
/// and argument/local table) without emitting any VM code.
pub fn index_class(tokens: &[Token]) -> Result<(String, ClassInfo)> {
    let mut parser = Parser::new(tokens, None, None);
    parser.compile_class()?;
    Ok((
        parser.class_name,
        ClassInfo {
            class_table: parser.class_table,
            subroutines: parser.subroutines,
        },
    ))
}

/// Pass 2: re-parses the same tokens with every class's [`ClassInfo`]
/// available, emitting VM code to `writer`.
pub fn compile_class(
    tokens: &[Token],
    class_infos: &HashMap<String, ClassInfo>,
    writer: &mut VmWriter,
) -> Result<()> {
    let mut parser = Parser::new(tokens, Some(writer), Some(class_infos));
    parser.compile_class()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use std::io::Read;

    fn compile_source(classes: &[&str]) -> String {
        let dir = tempfile::tempdir().unwrap();
        let mut token_streams = Vec::new();
        for (i, src) in classes.iter().enumerate() {
            token_streams.push((i, tokenize(src).unwrap()));
        }

        let mut class_infos = HashMap::new();
        for (_, tokens) in &token_streams {
            let (name, info) = index_class(tokens).unwrap();
            class_infos.insert(name, info);
        }

        let output_path = dir.path().join("out.vm");
        let mut writer = VmWriter::new(output_path.to_str().unwrap()).unwrap();
        for (_, tokens) in &token_streams {
            compile_class(tokens, &class_infos, &mut writer).unwrap();
        }
        writer.close().unwrap();

        let mut contents = String::new();
        std::fs::File::open(&output_path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        contents
    }

    #[test]
    fn compiles_a_void_function_returning_immediately() {
        let src = "class Main {\n  function void main() {\n    return;\n  }\n}\n";
        let vm = compile_source(&[src]);
        assert!(vm.contains("function Main.main 0"));
        assert!(vm.contains("push constant 0"));
        assert!(vm.contains("return"));
    }

    #[test]
    fn left_to_right_expression_has_no_precedence() {
        let src = "class Main {\n  function void main() {\n    do Output.printInt(1 + 2 * 3);\n    return;\n  }\n}\n";
        let vm = compile_source(&[src]);
        let add_pos = vm.find("add").unwrap();
        let mul_pos = vm.find("Math.multiply").unwrap();
        // 1 + 2 evaluated first (push 1, push 2, add), *then* multiplied by 3:
        // left-to-right with no precedence means `add` appears before `Math.multiply`.
        assert!(add_pos < mul_pos);
    }

    #[test]
    fn constructor_allocates_and_sets_this() {
        let src = "class Point {\n  field int x, y;\n  constructor Point new(int ax, int ay) {\n    let x = ax;\n    let y = ay;\n    return this;\n  }\n}\n";
        let vm = compile_source(&[src]);
        assert!(vm.contains("push constant 2"));
        assert!(vm.contains("call Memory.alloc 1"));
        assert!(vm.contains("pop pointer 0"));
    }

    #[test]
    fn method_call_on_a_field_pushes_the_receiver() {
        let src = "class Main {\n  function void main() {\n    var Point p;\n    let p = Point.new(1, 2);\n    do p.getX();\n    return;\n  }\n}\n";
        let point_src = "class Point {\n  field int x, y;\n  constructor Point new(int ax, int ay) { let x = ax; let y = ay; return this; }\n  method int getX() { return x; }\n}\n";
        let vm = compile_source(&[src, point_src]);
        assert!(vm.contains("call Point.getX 1"));
    }

    #[test]
    fn array_assignment_uses_the_temp_spill_sequence() {
        let src = "class Main {\n  function void main() {\n    var Array a;\n    let a[0] = 5;\n    return;\n  }\n}\n";
        let vm = compile_source(&[src]);
        assert!(vm.contains("pop temp 0"));
        assert!(vm.contains("pop pointer 1"));
        assert!(vm.contains("pop that 0"));
    }

    #[test]
    fn unresolved_identifier_is_a_name_error() {
        let src = "class Main {\n  function void main() {\n    let q = 1;\n    return;\n  }\n}\n";
        let tokens = tokenize(src).unwrap();
        let (name, info) = index_class(&tokens).unwrap();
        let mut class_infos = HashMap::new();
        class_infos.insert(name, info);

        let dir = tempfile::tempdir().unwrap();
        let output_path = dir.path().join("out.vm");
        let mut writer = VmWriter::new(output_path.to_str().unwrap()).unwrap();
        assert!(compile_class(&tokens, &class_infos, &mut writer).is_err());
    }
}
