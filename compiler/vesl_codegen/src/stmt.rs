//! Statement and declaration rendering.

use vesl_ir::{
    BlockId, Constructor, CtorFlags, CtorStatus, Expr, Field, FuncDeclaration, IfInstruction,
    Instruction, InterfaceDeclaration, ReturnStatement, SpecialStatement, SwitchInstruction,
};

use crate::dialect::InterfaceStyle;
use crate::generator::Generator;
use crate::RenderError;

/// Declarations that stand apart from their neighbours at top level.
fn is_declaration(instr: &Instruction) -> bool {
    matches!(
        instr,
        Instruction::Function(_) | Instruction::Struct(_) | Instruction::Interface(_)
    )
}

impl<'a> Generator<'a> {
    /// Write every instruction of `id` at the current indentation.
    pub(crate) fn block(&mut self, id: BlockId) -> Result<(), RenderError> {
        let shader = self.shader;
        let block = shader.tree().get(id).ok_or(RenderError::UnknownBlock(id))?;
        let separate = id.is_root();
        let mut previous: Option<&Instruction> = None;
        for instr in block.instructions() {
            if separate && previous.is_some_and(|prev| is_declaration(prev) || is_declaration(instr))
            {
                self.out.blank_line();
            }
            self.instruction(instr)?;
            previous = Some(instr);
        }
        Ok(())
    }

    /// Write `id` one level deeper.
    pub(crate) fn nested(&mut self, id: BlockId) -> Result<(), RenderError> {
        self.out.indent();
        let result = self.block(id);
        self.out.dedent();
        result
    }

    fn instruction(&mut self, instr: &'a Instruction) -> Result<(), RenderError> {
        match instr {
            Instruction::Statement(Expr::Constructor(ctor)) => self.ctor_statement(ctor),
            Instruction::Statement(expr) => {
                let line = format!("{};", self.expr(expr)?);
                self.out.writeln(&line);
                Ok(())
            }
            Instruction::Return(ret) => self.return_statement(ret),
            Instruction::Special(SpecialStatement::Vendor(text)) => {
                self.out.writeln(text);
                Ok(())
            }
            Instruction::Special(special) => {
                let line = format!("{};", self.dialect.special(special));
                self.out.writeln(&line);
                Ok(())
            }
            Instruction::If(chain) => self.if_chain(chain),
            Instruction::For(for_loop) => self.for_loop(for_loop),
            Instruction::While(while_loop) => {
                let line = format!("while ({}) {{", self.expr(&while_loop.condition)?);
                self.out.writeln(&line);
                self.nested(while_loop.body)?;
                self.out.writeln("}");
                Ok(())
            }
            Instruction::DoWhile(do_while) => {
                let condition = do_while
                    .condition
                    .as_ref()
                    .ok_or(RenderError::MissingLoopCondition)?;
                self.out.writeln("do {");
                self.nested(do_while.body)?;
                let line = format!("}} while ({});", self.expr(condition)?);
                self.out.writeln(&line);
                Ok(())
            }
            Instruction::Switch(switch) => self.switch(switch),
            Instruction::Function(func) => self.function(func),
            Instruction::Struct(decl) => {
                self.out.writeln(&format!("struct {} {{", decl.name));
                self.fields(&decl.fields);
                self.out.writeln("};");
                Ok(())
            }
            Instruction::Interface(decl) => self.interface(decl),
        }
    }

    /// A constructor in statement position declares its variable, forwards
    /// its value as a bare expression, or vanishes into its use site.
    fn ctor_statement(&mut self, ctor: &'a Constructor) -> Result<(), RenderError> {
        if ctor.flags.contains(CtorFlags::FUNCTION_ARGUMENT) {
            return Err(RenderError::Misplaced {
                kind: "parameter",
                context: "a statement block",
            });
        }
        let status = self
            .shader
            .var(ctor.var)
            .ok_or(RenderError::UnregisteredVariable(ctor.var))?
            .status();
        let line = match status {
            CtorStatus::Temporary => return Ok(()),
            CtorStatus::Forward => format!("{};", self.ctor_value(ctor)?),
            CtorStatus::Declaration => format!("{};", self.declaration(ctor)?),
            CtorStatus::Initialisation => {
                let target = self.declaration(ctor)?;
                format!("{target} = {};", self.ctor_value(ctor)?)
            }
        };
        self.out.writeln(&line);
        Ok(())
    }

    /// `[qualifier ]T name`
    pub(crate) fn declaration(&mut self, ctor: &Constructor) -> Result<String, RenderError> {
        let name = self.names.name_of(ctor.var)?;
        let declarator = self.dialect.declarator(&ctor.ty, &name);
        Ok(match ctor.qualifier {
            Some(qualifier) => format!("{} {declarator}", self.dialect.qualifier(qualifier)),
            None => declarator,
        })
    }

    fn return_statement(&mut self, ret: &'a ReturnStatement) -> Result<(), RenderError> {
        if let Some(mismatch) = &ret.mismatch {
            let note = format!(
                "// error: return type mismatch (expected {}, found {})",
                self.dialect.type_name(&mismatch.expected),
                self.dialect.type_name(&mismatch.found)
            );
            self.out.writeln(&note);
        }
        let line = match &ret.value {
            Some(value) => format!("return {};", self.expr(value)?),
            None => "return;".to_owned(),
        };
        self.out.writeln(&line);
        Ok(())
    }

    fn if_chain(&mut self, chain: &'a IfInstruction) -> Result<(), RenderError> {
        for (i, case) in chain.cases.iter().enumerate() {
            let head = match &case.condition {
                Some(condition) if i == 0 => format!("if ({}) {{", self.expr(condition)?),
                Some(condition) => format!("}} else if ({}) {{", self.expr(condition)?),
                None => "} else {".to_owned(),
            };
            self.out.writeln(&head);
            self.nested(case.body)?;
        }
        self.out.writeln("}");
        Ok(())
    }

    fn switch(&mut self, switch: &'a SwitchInstruction) -> Result<(), RenderError> {
        let head = format!("switch ({}) {{", self.expr(&switch.selector)?);
        self.out.writeln(&head);
        self.out.indent();
        for case in &switch.cases {
            let label = match case.label {
                Some(label) => format!("case {}: {{", self.dialect.literal(label)),
                None => "default: {".to_owned(),
            };
            self.out.writeln(&label);
            self.nested(case.body)?;
            self.out.writeln("}");
        }
        self.out.dedent();
        self.out.writeln("}");
        Ok(())
    }

    /// One definition per overload, separated by blank lines.
    fn function(&mut self, func: &'a FuncDeclaration) -> Result<(), RenderError> {
        let name = self.names.name_of(func.var)?;
        let return_type = self.dialect.type_name(&func.return_type);
        for (i, overload) in func.overloads.iter().enumerate() {
            if i > 0 {
                self.out.blank_line();
            }
            let params = self.parameters(overload.args)?;
            self.out
                .writeln(&format!("{return_type} {name}({params}) {{"));
            self.nested(overload.body)?;
            self.out.writeln("}");
        }
        Ok(())
    }

    fn parameters(&mut self, args: BlockId) -> Result<String, RenderError> {
        let shader = self.shader;
        let block = shader.tree().get(args).ok_or(RenderError::UnknownBlock(args))?;
        let mut params = Vec::with_capacity(block.len());
        for instr in block.instructions() {
            match instr {
                Instruction::Statement(Expr::Constructor(ctor))
                    if ctor.flags.contains(CtorFlags::FUNCTION_ARGUMENT) =>
                {
                    params.push(self.declaration(ctor)?);
                }
                other => {
                    return Err(RenderError::Misplaced {
                        kind: other.kind_name(),
                        context: "a parameter list",
                    })
                }
            }
        }
        Ok(params.join(", "))
    }

    fn fields(&mut self, fields: &[Field]) {
        self.out.indent();
        for field in fields {
            let line = format!("{};", self.dialect.declarator(&field.ty, &field.name));
            self.out.writeln(&line);
        }
        self.out.dedent();
    }

    fn interface(&mut self, decl: &'a InterfaceDeclaration) -> Result<(), RenderError> {
        let instance = self.names.name_of(decl.var)?;
        match self.dialect.interface_style() {
            InterfaceStyle::Block => {
                let qualifier = self.dialect.qualifier(decl.qualifier);
                self.out
                    .writeln(&format!("{qualifier} {} {{", decl.block_name));
                self.fields(&decl.fields);
                self.out.writeln(&format!("}} {instance};"));
            }
            InterfaceStyle::ConstantBuffer => {
                self.out.writeln(&format!("struct {} {{", decl.block_name));
                self.fields(&decl.fields);
                self.out.writeln("};");
                self.out
                    .writeln(&format!("ConstantBuffer<{}> {instance};", decl.block_name));
            }
        }
        Ok(())
    }
}
