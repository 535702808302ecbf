//! Function declarations, parameters and `return`.

use vesl_ir::{
    BlockKind, CtorFlags, CtorStatus, Expr, FuncDeclaration, Instruction, Overload, Qualifier,
    ReturnMismatch, ReturnStatement, TypeDesc, VarCategory, VarId,
};

use crate::context::{CtorSpec, FuncFrame, OverloadFrame, Scope};
use crate::{BuildContext, BuildError};

impl BuildContext {
    /// Declare a function in the current block.
    ///
    /// The function has no body until [`next_overload`](Self::next_overload)
    /// opens one. The returned variable is what call sites reference.
    pub fn begin_func(
        &mut self,
        name: impl Into<String>,
        return_type: TypeDesc,
    ) -> Result<VarId, BuildError> {
        let name = name.into();
        self.guard(|ctx| {
            ctx.settle_ifs();
            if ctx.scopes.iter().any(|scope| matches!(scope, Scope::Function(_))) {
                return Err(BuildError::NestedFunction(name));
            }
            let parent = ctx.prepare("function", false)?;
            let var = ctx.registry.create(
                return_type.clone(),
                VarCategory::Function,
                Some(name.clone()),
                CtorStatus::Declaration,
            );
            ctx.registry.disable(var)?;
            let at = ctx.commit(
                parent,
                Instruction::Function(FuncDeclaration {
                    var,
                    name,
                    return_type,
                    overloads: Vec::new(),
                }),
            );
            ctx.scopes.push(Scope::Function(FuncFrame {
                at,
                var,
                parent,
                overload: None,
            }));
            tracing::debug!(?at, %var, "begin function");
            Ok(var)
        })
    }

    /// Open a new overload of the innermost function.
    ///
    /// The cursor moves into the parameter list; once `params.len()`
    /// parameters have been declared it moves into the body. With no
    /// parameters it goes straight to the body.
    pub fn next_overload(&mut self, params: Vec<TypeDesc>) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::Function(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_func",
                    found: "next_overload",
                });
            };
            ctx.check_signature_complete(frame, "next_overload")?;

            let return_type = match ctx.tree.instruction(frame.at) {
                Some(Instruction::Function(func)) => func.return_type.clone(),
                _ => {
                    return Err(BuildError::Unbalanced {
                        expected: "begin_func",
                        found: "next_overload",
                    })
                }
            };
            let expected = params.len();
            let args = ctx.tree.new_block(frame.parent, BlockKind::FuncArgs);
            let body = ctx
                .tree
                .new_block(frame.parent, BlockKind::Return { return_type });
            if let Some(Instruction::Function(func)) = ctx.tree.instruction_mut(frame.at) {
                func.overloads.push(Overload { params, args, body });
            }
            ctx.replace_top(Scope::Function(FuncFrame {
                overload: Some(OverloadFrame {
                    args,
                    body,
                    expected,
                    received: 0,
                }),
                ..frame
            }));
            ctx.current = if expected == 0 { body } else { args };
            tracing::debug!(at = ?frame.at, params = expected, "next overload");
            Ok(())
        })
    }

    /// [`begin_func`](Self::begin_func) followed by one
    /// [`next_overload`](Self::next_overload).
    pub fn begin_func_with(
        &mut self,
        name: impl Into<String>,
        return_type: TypeDesc,
        params: Vec<TypeDesc>,
    ) -> Result<VarId, BuildError> {
        let var = self.begin_func(name, return_type)?;
        self.next_overload(params)?;
        Ok(var)
    }

    /// Declare the next parameter of the open overload.
    pub fn declare_param(
        &mut self,
        ty: TypeDesc,
        name: Option<&str>,
        qualifier: Option<Qualifier>,
    ) -> Result<VarId, BuildError> {
        let mut spec = CtorSpec::new(ty, CtorStatus::Declaration)
            .with_flags(CtorFlags::FUNCTION_ARGUMENT);
        spec.name = name.map(str::to_owned);
        spec.qualifier = qualifier;
        self.guard(|ctx| ctx.emit_ctor(spec))
    }

    /// Close the innermost function and return to the block it was
    /// declared in.
    pub fn end_func(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::Function(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_func",
                    found: "end_func",
                });
            };
            if frame.overload.is_none() {
                return Err(BuildError::NoOverload(ctx.function_name(frame)));
            }
            ctx.check_signature_complete(frame, "end_func")?;
            ctx.current = frame.parent;
            ctx.scopes.pop();
            tracing::debug!(at = ?frame.at, "end function");
            Ok(())
        })
    }

    /// Append `return value;`.
    ///
    /// `ty` is the type of `value`. A type that differs from the enclosing
    /// function's return type is not an error: the mismatch is recorded on
    /// the statement and rendered as a comment.
    pub fn return_value(&mut self, value: Expr, ty: TypeDesc) -> Result<(), BuildError> {
        self.guard(|ctx| ctx.push_return(Some(value), ty))
    }

    /// Append `return;`.
    pub fn return_void(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| ctx.push_return(None, TypeDesc::VOID))
    }

    fn push_return(&mut self, value: Option<Expr>, found: TypeDesc) -> Result<(), BuildError> {
        let block = self.prepare("return", false)?;
        let Some(expected) = self.tree.enclosing_return_type(block).cloned() else {
            return Err(BuildError::NotInFunction("return"));
        };
        let mismatch = if expected == found {
            None
        } else {
            tracing::warn!(%expected, %found, "return type mismatch");
            Some(ReturnMismatch { expected, found })
        };
        self.commit(block, Instruction::Return(ReturnStatement { value, mismatch }));
        Ok(())
    }

    fn check_signature_complete(
        &self,
        frame: FuncFrame,
        kind: &'static str,
    ) -> Result<(), BuildError> {
        match frame.overload {
            Some(overload) if overload.in_signature() => {
                Err(BuildError::NonArgumentInSignature {
                    kind,
                    function: self.function_name(frame),
                    missing: overload.expected - overload.received,
                })
            }
            _ => Ok(()),
        }
    }

    fn function_name(&self, frame: FuncFrame) -> String {
        match self.tree.instruction(frame.at) {
            Some(Instruction::Function(func)) => func.name.clone(),
            _ => frame.var.to_string(),
        }
    }
}

#[cfg(test)]
mod tests;
