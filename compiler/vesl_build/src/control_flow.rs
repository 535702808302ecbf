//! Control flow scopes: if chains, loops, switches and keyword statements.

use vesl_ir::{
    BlockKind, Constructor, CtorFlags, CtorStatus, DoWhileInstruction, Expr, ForClauses,
    ForHeader, ForInstruction, IfCase, IfInstruction, InstrRef, Instruction, Literal,
    SpecialStatement, SwitchCase, SwitchInstruction, TypeDesc, VarId, WhileInstruction,
};

use crate::context::{ForFrame, ForPhase, IfFrame, LoopFrame, Scope, SwitchFrame};
use crate::{BuildContext, BuildError};

impl BuildContext {
    // ── If ─────────────────────────────────────────────────────

    /// Open an if chain and move into its first body.
    pub fn begin_if(&mut self, condition: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("if", false)?;
            let body = ctx.tree.new_block(parent, BlockKind::Plain);
            let at = ctx.commit(
                parent,
                Instruction::If(IfInstruction {
                    cases: vec![IfCase {
                        condition: Some(condition),
                        body,
                    }],
                }),
            );
            ctx.scopes.push(Scope::If(IfFrame {
                at,
                parent,
                waiting_for_else: false,
            }));
            ctx.current = body;
            tracing::debug!(?at, "begin if");
            Ok(())
        })
    }

    /// Append an `else if` case to the innermost if chain.
    pub fn begin_else_if(&mut self, condition: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| ctx.add_if_case(Some(condition), "begin_else_if"))
    }

    /// Append the terminal `else` case to the innermost if chain.
    pub fn begin_else(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| ctx.add_if_case(None, "begin_else"))
    }

    /// Close the current case body.
    ///
    /// The chain stays open for further `else` cases unless the closed
    /// case was the `else`.
    pub fn end_if_sub_block(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let frame = match ctx.top() {
                Some(Scope::If(frame)) if !frame.waiting_for_else => frame,
                _ => {
                    return Err(BuildError::Unbalanced {
                        expected: "begin_if",
                        found: "end_if_sub_block",
                    })
                }
            };
            let closed_else = ctx.if_chain(frame.at, "end_if_sub_block")?.has_else();
            ctx.current = frame.parent;
            if closed_else {
                ctx.scopes.pop();
                tracing::debug!(at = ?frame.at, "if chain closed");
            } else {
                ctx.replace_top(Scope::If(IfFrame {
                    waiting_for_else: true,
                    ..frame
                }));
            }
            Ok(())
        })
    }

    /// Close the innermost if chain.
    ///
    /// Works both from inside the last case body and after
    /// [`end_if_sub_block`](Self::end_if_sub_block).
    pub fn end_if(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            if let Some(Scope::If(frame)) = ctx.top() {
                if frame.waiting_for_else {
                    ctx.scopes.pop();
                    tracing::debug!(at = ?frame.at, "end if");
                    return Ok(());
                }
            }
            ctx.settle_ifs();
            match ctx.top() {
                Some(Scope::If(frame)) => {
                    ctx.current = frame.parent;
                    ctx.scopes.pop();
                    tracing::debug!(at = ?frame.at, "end if");
                    Ok(())
                }
                _ => Err(BuildError::Unbalanced {
                    expected: "begin_if",
                    found: "end_if",
                }),
            }
        })
    }

    fn add_if_case(
        &mut self,
        condition: Option<Expr>,
        found: &'static str,
    ) -> Result<(), BuildError> {
        let Some(Scope::If(frame)) = self.top() else {
            return Err(BuildError::ElseWithoutIf(found));
        };
        let chain = self.if_chain(frame.at, found)?;
        if chain.has_else() {
            return Err(BuildError::ElseAfterElse(found));
        }
        if !frame.waiting_for_else {
            // Still inside the last case: close it implicitly.
            let in_last_case = chain.cases.last().is_some_and(|case| case.body == self.current);
            if !in_last_case {
                return Err(BuildError::ElseWithoutIf(found));
            }
        }

        let body = self.tree.new_block(frame.parent, BlockKind::Plain);
        if let Some(Instruction::If(chain)) = self.tree.instruction_mut(frame.at) {
            chain.cases.push(IfCase { condition, body });
        }
        self.replace_top(Scope::If(IfFrame {
            waiting_for_else: false,
            ..frame
        }));
        self.current = body;
        tracing::debug!(at = ?frame.at, "{found}");
        Ok(())
    }

    fn if_chain(&self, at: InstrRef, found: &'static str) -> Result<&IfInstruction, BuildError> {
        match self.tree.instruction(at) {
            Some(Instruction::If(chain)) => Ok(chain),
            _ => Err(BuildError::Unbalanced {
                expected: "begin_if",
                found,
            }),
        }
    }

    // ── For ────────────────────────────────────────────────────

    /// Open a for loop whose header is recorded as ordinary pushes.
    ///
    /// Follow with [`begin_for_args`](Self::begin_for_args) to record the
    /// header, then [`begin_for_body`](Self::begin_for_body). The header
    /// statements are split into init, condition and increment clauses when
    /// the loop is rendered.
    pub fn begin_for(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("for", false)?;
            let args = ctx.tree.new_block(parent, BlockKind::ForArgs);
            let body = ctx.tree.new_block(parent, BlockKind::Plain);
            let at = ctx.commit(
                parent,
                Instruction::For(ForInstruction {
                    header: ForHeader::Recorded {
                        args,
                        stacked_condition: None,
                        policy: ctx.options.for_condition_policy,
                    },
                    body,
                }),
            );
            ctx.scopes.push(Scope::For(ForFrame {
                at,
                parent,
                args: Some(args),
                body,
                phase: ForPhase::Created,
            }));
            tracing::debug!(?at, "begin for");
            Ok(())
        })
    }

    /// Open a for loop from clauses the front end already separated, and
    /// move straight into its body.
    pub fn begin_for_clauses(&mut self, clauses: ForClauses) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("for", false)?;
            let body = ctx.tree.new_block(parent, BlockKind::Plain);
            let at = ctx.commit(
                parent,
                Instruction::For(ForInstruction {
                    header: ForHeader::Clauses(clauses),
                    body,
                }),
            );
            ctx.scopes.push(Scope::For(ForFrame {
                at,
                parent,
                args: None,
                body,
                phase: ForPhase::Body,
            }));
            ctx.current = body;
            tracing::debug!(?at, "begin for");
            Ok(())
        })
    }

    /// Build an init clause `T name = value` for
    /// [`begin_for_clauses`](Self::begin_for_clauses).
    ///
    /// The variable is declared by the header itself, so it is never
    /// inlined; reference it in the condition and body through the
    /// returned id.
    pub fn for_init(
        &mut self,
        ty: TypeDesc,
        name: Option<&str>,
        value: Expr,
    ) -> Result<(VarId, Expr), BuildError> {
        self.guard(|ctx| {
            let var = ctx.registry.create(
                ty.clone(),
                ty.category(),
                name.map(str::to_owned),
                CtorStatus::Initialisation,
            );
            ctx.registry.disable(var)?;
            let init = Expr::Constructor(Box::new(Constructor {
                var,
                ty,
                status: CtorStatus::Initialisation,
                flags: CtorFlags::empty(),
                qualifier: None,
                args: vec![value],
            }));
            Ok((var, init))
        })
    }

    /// Move into the recorded header of the innermost for loop.
    pub fn begin_for_args(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let frame = ctx.top_for("begin_for_args")?;
            match (frame.phase, frame.args) {
                (ForPhase::Created, Some(args)) => {
                    ctx.current = args;
                    ctx.replace_top(Scope::For(ForFrame {
                        phase: ForPhase::Args,
                        ..frame
                    }));
                    Ok(())
                }
                (phase, _) => Err(BuildError::ForPhase {
                    phase: phase.name(),
                    found: "begin_for_args",
                }),
            }
        })
    }

    /// Supply the loop condition out of band, next to the recorded header.
    ///
    /// If the header also records a boolean forward, the configured
    /// [`ForConditionPolicy`](vesl_ir::ForConditionPolicy) picks one.
    pub fn stack_for_condition(&mut self, condition: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let frame = ctx.top_for("stack_for_condition")?;
            if frame.phase == ForPhase::Body {
                return Err(BuildError::ForPhase {
                    phase: frame.phase.name(),
                    found: "stack_for_condition",
                });
            }
            if let Some(Instruction::For(ForInstruction {
                header: ForHeader::Recorded {
                    stacked_condition, ..
                },
                ..
            })) = ctx.tree.instruction_mut(frame.at)
            {
                *stacked_condition = Some(condition);
            }
            Ok(())
        })
    }

    /// Leave the header (if any) and move into the loop body.
    pub fn begin_for_body(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let frame = ctx.top_for("begin_for_body")?;
            if frame.phase == ForPhase::Body {
                return Err(BuildError::ForPhase {
                    phase: frame.phase.name(),
                    found: "begin_for_body",
                });
            }
            ctx.current = frame.body;
            ctx.replace_top(Scope::For(ForFrame {
                phase: ForPhase::Body,
                ..frame
            }));
            Ok(())
        })
    }

    pub fn end_for(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let frame = ctx.top_for("end_for")?;
            if frame.phase != ForPhase::Body {
                return Err(BuildError::ForPhase {
                    phase: frame.phase.name(),
                    found: "end_for",
                });
            }
            ctx.current = frame.parent;
            ctx.scopes.pop();
            tracing::debug!(at = ?frame.at, "end for");
            Ok(())
        })
    }

    fn top_for(&self, found: &'static str) -> Result<ForFrame, BuildError> {
        match self.top() {
            Some(Scope::For(frame)) => Ok(frame),
            _ => Err(BuildError::Unbalanced {
                expected: "begin_for",
                found,
            }),
        }
    }

    // ── While / do-while ───────────────────────────────────────

    pub fn begin_while(&mut self, condition: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("while", false)?;
            let body = ctx.tree.new_block(parent, BlockKind::Plain);
            let at = ctx.commit(
                parent,
                Instruction::While(WhileInstruction { condition, body }),
            );
            ctx.scopes
                .push(Scope::While(LoopFrame { at, parent }));
            ctx.current = body;
            tracing::debug!(?at, "begin while");
            Ok(())
        })
    }

    pub fn end_while(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::While(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_while",
                    found: "end_while",
                });
            };
            ctx.current = frame.parent;
            ctx.scopes.pop();
            tracing::debug!(at = ?frame.at, "end while");
            Ok(())
        })
    }

    /// Open a `do { ... } while (cond);` body. The condition is given to
    /// [`end_do_while`](Self::end_do_while).
    pub fn begin_do_while(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("do-while", false)?;
            let body = ctx.tree.new_block(parent, BlockKind::Plain);
            let at = ctx.commit(
                parent,
                Instruction::DoWhile(DoWhileInstruction {
                    body,
                    condition: None,
                }),
            );
            ctx.scopes
                .push(Scope::DoWhile(LoopFrame { at, parent }));
            ctx.current = body;
            tracing::debug!(?at, "begin do-while");
            Ok(())
        })
    }

    pub fn end_do_while(&mut self, condition: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::DoWhile(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_do_while",
                    found: "end_do_while",
                });
            };
            if let Some(Instruction::DoWhile(instr)) = ctx.tree.instruction_mut(frame.at) {
                instr.condition = Some(condition);
            }
            ctx.current = frame.parent;
            ctx.scopes.pop();
            tracing::debug!(at = ?frame.at, "end do-while");
            Ok(())
        })
    }

    // ── Switch ─────────────────────────────────────────────────

    /// Open a switch. Nothing may be pushed until the first
    /// [`add_case`](Self::add_case).
    pub fn begin_switch(&mut self, selector: Expr) -> Result<(), BuildError> {
        self.guard(|ctx| {
            let parent = ctx.prepare("switch", false)?;
            let at = ctx.commit(
                parent,
                Instruction::Switch(SwitchInstruction {
                    selector,
                    cases: Vec::new(),
                }),
            );
            ctx.scopes.push(Scope::Switch(SwitchFrame {
                at,
                parent,
                open_case: None,
            }));
            tracing::debug!(?at, "begin switch");
            Ok(())
        })
    }

    /// Close the open case (if any) and start a new one. `None` is the
    /// `default` label; a switch has at most one.
    pub fn add_case(&mut self, label: Option<Literal>) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::Switch(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_switch",
                    found: "add_case",
                });
            };
            let body = ctx.tree.new_block(frame.parent, BlockKind::Plain);
            if let Some(Instruction::Switch(switch)) = ctx.tree.instruction_mut(frame.at) {
                if label.is_none() && switch.cases.iter().any(|case| case.label.is_none()) {
                    return Err(BuildError::DuplicateDefault);
                }
                switch.cases.push(SwitchCase { label, body });
            }
            ctx.replace_top(Scope::Switch(SwitchFrame {
                open_case: Some(body),
                ..frame
            }));
            ctx.current = body;
            tracing::debug!(at = ?frame.at, ?label, "add case");
            Ok(())
        })
    }

    pub fn end_switch(&mut self) -> Result<(), BuildError> {
        self.guard(|ctx| {
            ctx.settle_ifs();
            let Some(Scope::Switch(frame)) = ctx.top() else {
                return Err(BuildError::Unbalanced {
                    expected: "begin_switch",
                    found: "end_switch",
                });
            };
            ctx.current = frame.parent;
            ctx.scopes.pop();
            tracing::debug!(at = ?frame.at, "end switch");
            Ok(())
        })
    }

    // ── Keyword statements ─────────────────────────────────────

    /// Append a keyword statement.
    ///
    /// `break` needs an enclosing loop or switch case, `continue` an
    /// enclosing loop, `discard` an enclosing function. Vendor statements
    /// go anywhere.
    pub fn add_statement(&mut self, stmt: SpecialStatement) -> Result<(), BuildError> {
        self.guard(|ctx| {
            match stmt {
                SpecialStatement::Break if !ctx.in_breakable(true) => {
                    return Err(BuildError::NotInLoop("break"));
                }
                SpecialStatement::Continue if !ctx.in_breakable(false) => {
                    return Err(BuildError::NotInLoop("continue"));
                }
                SpecialStatement::Discard
                    if !ctx.scopes.iter().any(|scope| matches!(scope, Scope::Function(_))) =>
                {
                    return Err(BuildError::NotInFunction("discard"));
                }
                _ => {}
            }
            ctx.push_instruction(Instruction::Special(stmt)).map(|_| ())
        })
    }

    pub fn break_loop(&mut self) -> Result<(), BuildError> {
        self.add_statement(SpecialStatement::Break)
    }

    pub fn continue_loop(&mut self) -> Result<(), BuildError> {
        self.add_statement(SpecialStatement::Continue)
    }

    pub fn discard(&mut self) -> Result<(), BuildError> {
        self.add_statement(SpecialStatement::Discard)
    }

    /// Walk outward to the nearest loop (or switch, if `switch_counts`)
    /// without leaving the enclosing function.
    fn in_breakable(&self, switch_counts: bool) -> bool {
        for scope in self.scopes.iter().rev() {
            match scope {
                Scope::For(frame) if frame.phase == ForPhase::Body => return true,
                Scope::While(_) | Scope::DoWhile(_) => return true,
                Scope::Switch(frame) if switch_counts && frame.open_case.is_some() => {
                    return true;
                }
                Scope::Function(_) => return false,
                Scope::If(_) | Scope::For(_) | Scope::Switch(_) => {}
            }
        }
        false
    }
}
