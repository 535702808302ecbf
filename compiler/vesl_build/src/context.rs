//! The build cursor.
//!
//! [`BuildContext`] owns the instruction tree under construction and a
//! cursor (the current block) into it. Front ends drive it with a flat
//! sequence of calls: `begin_*` opens a scope and moves the cursor into it,
//! `end_*` moves it back out, and everything in between is appended to the
//! current block in call order.
//!
//! # Deferred if-closure
//!
//! `end_if_sub_block` does not close an if chain: the chain stays open,
//! waiting for a possible `begin_else_if` / `begin_else`. Any other call
//! that reaches the enclosing block first (a plain push, a new `begin_if`,
//! or the close of an enclosing scope) finalizes the waiting chain. All of
//! these go through [`BuildContext::settle_ifs`].
//!
//! # Function signatures
//!
//! While an overload's parameter list is open, the cursor sits in its
//! argument block. Each argument constructor counts towards the declared
//! parameter count; when the count is reached the cursor moves to the body
//! on its own. That bookkeeping lives in the push chokepoint
//! ([`BuildContext::push_instruction`]), not in the callers.
//!
//! # Failure
//!
//! Every structural error poisons the context: the error is stored, and
//! every later call returns [`BuildError::Poisoned`] wrapping it.

use vesl_ir::{
    BlockId, BlockKind, Constructor, CtorFlags, CtorStatus, Expr, InstrRef, Instruction, IrTree,
    Qualifier, TypeDesc, VarId,
};

use crate::registry::VarRegistry;
use crate::{BuildError, BuildOptions, Shader};

// Scope frames

/// An open if chain.
#[derive(Copy, Clone, Debug)]
pub(crate) struct IfFrame {
    pub(crate) at: InstrRef,
    pub(crate) parent: BlockId,
    /// The last case body was closed; the chain may still grow.
    pub(crate) waiting_for_else: bool,
}

/// Progress through a for loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ForPhase {
    /// Instruction pushed, header not entered yet.
    Created,
    /// Cursor in the recorded header block.
    Args,
    /// Cursor in the loop body.
    Body,
}

impl ForPhase {
    pub(crate) const fn name(self) -> &'static str {
        match self {
            ForPhase::Created => "created",
            ForPhase::Args => "args",
            ForPhase::Body => "body",
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct ForFrame {
    pub(crate) at: InstrRef,
    pub(crate) parent: BlockId,
    pub(crate) args: Option<BlockId>,
    pub(crate) body: BlockId,
    pub(crate) phase: ForPhase,
}

/// An open `while` or `do`/`while` body.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LoopFrame {
    pub(crate) at: InstrRef,
    pub(crate) parent: BlockId,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct SwitchFrame {
    pub(crate) at: InstrRef,
    pub(crate) parent: BlockId,
    pub(crate) open_case: Option<BlockId>,
}

/// The overload currently being built.
#[derive(Copy, Clone, Debug)]
pub(crate) struct OverloadFrame {
    pub(crate) args: BlockId,
    pub(crate) body: BlockId,
    pub(crate) expected: usize,
    pub(crate) received: usize,
}

impl OverloadFrame {
    /// Check whether the parameter list is still being filled.
    #[inline]
    pub(crate) fn in_signature(self) -> bool {
        self.received < self.expected
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct FuncFrame {
    pub(crate) at: InstrRef,
    pub(crate) var: VarId,
    pub(crate) parent: BlockId,
    pub(crate) overload: Option<OverloadFrame>,
}

/// One open scope on the cursor stack.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Scope {
    If(IfFrame),
    For(ForFrame),
    While(LoopFrame),
    DoWhile(LoopFrame),
    Switch(SwitchFrame),
    Function(FuncFrame),
}

impl Scope {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            Scope::If(_) => "if",
            Scope::For(_) => "for",
            Scope::While(_) => "while",
            Scope::DoWhile(_) => "do-while",
            Scope::Switch(_) => "switch",
            Scope::Function(_) => "function",
        }
    }
}

// Constructor requests

/// Everything needed to emit one constructor.
///
/// The shorthand methods on [`BuildContext`] (`construct`, `declare`,
/// `forward`, ...) cover the common shapes; this is the general form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CtorSpec {
    pub ty: TypeDesc,
    pub status: CtorStatus,
    pub flags: CtorFlags,
    pub qualifier: Option<Qualifier>,
    pub name: Option<String>,
    pub args: Vec<Expr>,
}

impl CtorSpec {
    pub fn new(ty: TypeDesc, status: CtorStatus) -> Self {
        Self {
            ty,
            status,
            flags: CtorFlags::empty(),
            qualifier: None,
            name: None,
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: CtorFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<Expr>) -> Self {
        self.args = args;
        self
    }
}

// BuildContext

/// Cursor-driven builder for one shader.
///
/// Consumed by [`finish`](BuildContext::finish) to produce a [`Shader`].
pub struct BuildContext {
    pub(crate) tree: IrTree,
    pub(crate) registry: VarRegistry,
    pub(crate) options: BuildOptions,
    pub(crate) current: BlockId,
    pub(crate) scopes: Vec<Scope>,
    failure: Option<BuildError>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::new(BuildOptions::default())
    }
}

impl BuildContext {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            tree: IrTree::new(),
            registry: VarRegistry::new(),
            options,
            current: BlockId::ROOT,
            scopes: Vec::new(),
            failure: None,
        }
    }

    /// The block new instructions are appended to.
    #[inline]
    pub fn current_block(&self) -> BlockId {
        self.current
    }

    #[inline]
    pub fn tree(&self) -> &IrTree {
        &self.tree
    }

    #[inline]
    pub fn registry(&self) -> &VarRegistry {
        &self.registry
    }

    #[inline]
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Number of open scopes, waiting if chains included.
    #[inline]
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// The error that poisoned this context, if any.
    pub fn failure(&self) -> Option<&BuildError> {
        self.failure.as_ref()
    }

    /// Drop all state and start over with an empty tree and registry.
    pub fn reset(&mut self) {
        tracing::debug!("build context reset");
        self.tree = IrTree::new();
        self.registry.clear();
        self.current = BlockId::ROOT;
        self.scopes.clear();
        self.failure = None;
    }

    /// Close the build and hand over the tree and registry.
    ///
    /// Any if chain still waiting for an `else` is finalized; any other
    /// open scope is an error.
    pub fn finish(mut self) -> Result<Shader, BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            if let Some(scope) = ctx.scopes.last() {
                return Err(BuildError::UnclosedScope(scope.name()));
            }
            debug_assert!(ctx.current.is_root(), "no open scope but cursor left root");
            Ok(())
        })?;
        if self.options.elide_dead_declarations {
            self.registry.elide_dead();
        }
        tracing::debug!(
            blocks = self.tree.len(),
            vars = self.registry.len(),
            "build finished"
        );
        Ok(Shader::new(self.tree, self.registry))
    }

    // ── Failure handling ───────────────────────────────────────

    /// Run `op` unless the context is poisoned; poison it if `op` fails.
    pub(crate) fn guard<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, BuildError>,
    ) -> Result<T, BuildError> {
        if let Some(first) = &self.failure {
            return Err(BuildError::Poisoned(Box::new(first.clone())));
        }
        let result = op(self);
        if let Err(err) = &result {
            tracing::debug!(%err, "build context poisoned");
            self.failure = Some(err.clone());
        }
        result
    }

    // ── Push chokepoint ────────────────────────────────────────

    /// Finalize every if chain that is waiting for an `else` in the
    /// current block.
    pub(crate) fn settle_ifs(&mut self) {
        while let Some(Scope::If(frame)) = self.scopes.last() {
            if !frame.waiting_for_else {
                break;
            }
            debug_assert_eq!(frame.parent, self.current);
            tracing::debug!(at = ?frame.at, "if chain closed");
            self.scopes.pop();
        }
    }

    #[inline]
    pub(crate) fn top(&self) -> Option<Scope> {
        self.scopes.last().copied()
    }

    pub(crate) fn replace_top(&mut self, scope: Scope) {
        if let Some(top) = self.scopes.last_mut() {
            *top = scope;
        }
    }

    /// Validate that an instruction of `kind` may be appended now and
    /// return the block it will land in.
    ///
    /// Scope-opening callers use the returned block as the parent of their
    /// child blocks before committing.
    pub(crate) fn prepare(
        &mut self,
        kind: &'static str,
        is_argument: bool,
    ) -> Result<BlockId, BuildError> {
        self.settle_ifs();
        match self.scopes.last() {
            Some(Scope::Switch(frame)) if frame.open_case.is_none() => {
                return Err(BuildError::OutsideCase(kind));
            }
            Some(Scope::For(frame)) if frame.phase == ForPhase::Created => {
                return Err(BuildError::OutsideForPhase(kind));
            }
            Some(Scope::Function(frame)) => match frame.overload {
                None => return Err(BuildError::NoOverload(self.var_name(frame.var))),
                Some(overload) if overload.in_signature() && !is_argument => {
                    return Err(BuildError::NonArgumentInSignature {
                        kind,
                        function: self.var_name(frame.var),
                        missing: overload.expected - overload.received,
                    });
                }
                Some(overload) if overload.in_signature() => return Ok(self.current),
                Some(_) => {}
            },
            _ => {}
        }
        if is_argument {
            return Err(BuildError::NotInSignature);
        }
        Ok(self.current)
    }

    /// Append a validated instruction to `block`.
    pub(crate) fn commit(&mut self, block: BlockId, instr: Instruction) -> InstrRef {
        tracing::trace!(kind = instr.kind_name(), ?block, "push");
        let built = instr.as_constructor().map(|ctor| ctor.var);
        let at = self.tree.push_instruction(block, instr);
        self.registry.record_push(built);
        if let Some(Scope::Function(frame)) = self.scopes.last_mut() {
            if let Some(overload) = frame.overload.as_mut() {
                if block == overload.args {
                    overload.received += 1;
                    if !overload.in_signature() {
                        tracing::trace!(body = ?overload.body, "signature complete");
                        self.current = overload.body;
                    }
                }
            }
        }
        at
    }

    /// Append `instr` to the current block.
    pub(crate) fn push_instruction(&mut self, instr: Instruction) -> Result<InstrRef, BuildError> {
        let is_argument = instr
            .as_constructor()
            .is_some_and(|ctor| ctor.flags.contains(CtorFlags::FUNCTION_ARGUMENT));
        let block = self.prepare(instr.kind_name(), is_argument)?;
        if let Some(ctor) = instr.as_constructor() {
            if matches!(self.tree.block(block).kind(), BlockKind::ForArgs) {
                // Header inits are loop counters; they always keep their name.
                self.registry.disable(ctor.var)?;
            }
        }
        Ok(self.commit(block, instr))
    }

    fn var_name(&self, id: VarId) -> String {
        self.registry
            .get(id)
            .and_then(|record| record.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // ── Values ─────────────────────────────────────────────────

    /// Emit a constructor statement and return its variable.
    pub fn emit(&mut self, spec: CtorSpec) -> Result<VarId, BuildError> {
        self.guard(|ctx| ctx.emit_ctor(spec))
    }

    pub(crate) fn emit_ctor(&mut self, spec: CtorSpec) -> Result<VarId, BuildError> {
        if spec.status == CtorStatus::Forward && spec.args.len() != 1 {
            return Err(BuildError::ForwardArity {
                ty: spec.ty,
                count: spec.args.len(),
            });
        }
        let pinned = spec.qualifier.is_some() || spec.flags.contains(CtorFlags::FUNCTION_ARGUMENT);
        let var = self
            .registry
            .create(spec.ty.clone(), spec.ty.category(), spec.name, spec.status);
        if pinned {
            self.registry.disable(var)?;
        }
        let ctor = Constructor {
            var,
            ty: spec.ty,
            status: spec.status,
            flags: spec.flags,
            qualifier: spec.qualifier,
            args: spec.args,
        };
        self.push_instruction(Instruction::Statement(Expr::Constructor(Box::new(ctor))))?;
        Ok(var)
    }

    /// `T v = T(args);`, inlined if consumed exactly once.
    pub fn construct(&mut self, ty: TypeDesc, args: Vec<Expr>) -> Result<VarId, BuildError> {
        self.emit(
            CtorSpec::new(ty, CtorStatus::Initialisation)
                .with_flags(CtorFlags::CALL)
                .with_args(args),
        )
    }

    /// Like [`construct`](Self::construct) with an explicit name; never
    /// inlined.
    pub fn construct_named(
        &mut self,
        ty: TypeDesc,
        name: impl Into<String>,
        args: Vec<Expr>,
    ) -> Result<VarId, BuildError> {
        self.emit(
            CtorSpec::new(ty, CtorStatus::Initialisation)
                .with_flags(CtorFlags::CALL)
                .with_name(name)
                .with_args(args),
        )
    }

    /// `T v;`, a declaration without a value.
    pub fn declare(&mut self, ty: TypeDesc, name: Option<&str>) -> Result<VarId, BuildError> {
        let mut spec = CtorSpec::new(ty, CtorStatus::Declaration);
        spec.name = name.map(str::to_owned);
        self.emit(spec)
    }

    /// Wrap an expression whose binding is decided by how it is used:
    /// inlined, named, or left as a bare expression statement.
    pub fn forward(&mut self, ty: TypeDesc, value: Expr) -> Result<VarId, BuildError> {
        self.emit(CtorSpec::new(ty, CtorStatus::Forward).with_args(vec![value]))
    }

    /// Build a constructor expression that is never declared, for use
    /// directly as an operand: `T(args)`.
    pub fn inline_ctor(&mut self, ty: TypeDesc, args: Vec<Expr>) -> Result<Expr, BuildError> {
        self.guard(|ctx| {
            let var =
                ctx.registry
                    .create(ty.clone(), ty.category(), None, CtorStatus::Temporary);
            ctx.registry.disable(var)?;
            Ok(Expr::Constructor(Box::new(Constructor {
                var,
                ty,
                status: CtorStatus::Temporary,
                flags: CtorFlags::CALL,
                qualifier: None,
                args,
            })))
        })
    }

    /// Reference `id` by name.
    pub fn var(&mut self, id: VarId) -> Result<Expr, BuildError> {
        self.guard(|ctx| {
            ctx.registry.mark_used(id)?;
            Ok(Expr::Reference(id))
        })
    }

    /// Reference `id` as a temporary; a value consumed exactly once is
    /// inlined at that use.
    pub fn consume(&mut self, id: VarId) -> Result<Expr, BuildError> {
        self.guard(|ctx| {
            ctx.registry.consume(id)?;
            Ok(Expr::Reference(id))
        })
    }

    /// Append an expression statement.
    pub fn push_expression(&mut self, expr: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| ctx.push_instruction(Instruction::Statement(expr)).map(|_| ()))
    }
}

#[cfg(test)]
mod tests;
