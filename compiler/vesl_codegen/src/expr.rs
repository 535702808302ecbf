//! Expression rendering.
//!
//! Parentheses are added only where the ranks require them: a child is
//! wrapped when it binds looser than its parent. On a tie, the operand on
//! the side opposite the operator's associativity is wrapped too, so
//! `a - (b - c)` and `(a = b) = c` keep their meaning, and a prefix
//! operand under a prefix operator is wrapped so `-(-x)` never becomes
//! `--x`.

use vesl_ir::{Assoc, Callee, Constructor, CtorFlags, Expr, Fixity, Rank};

use crate::generator::Generator;
use crate::names::Binding;
use crate::RenderError;

/// Parent rank for call and constructor arguments; only a comma list
/// needs wrapping there.
const ARGUMENT: Rank = Rank::ASSIGN;

impl<'a> Generator<'a> {
    /// Render `expr` in a bracketed context (statement, condition, index).
    pub(crate) fn expr(&mut self, expr: &'a Expr) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_expr(&mut out, expr)?;
        Ok(out)
    }

    /// Render the value of a constructor: its single forwarded argument, or
    /// `T(args)` shaped by its flags.
    pub(crate) fn ctor_value(&mut self, ctor: &'a Constructor) -> Result<String, RenderError> {
        let mut out = String::new();
        self.write_ctor_value(&mut out, ctor)?;
        Ok(out)
    }

    /// Rank of `expr` as it will be written.
    ///
    /// References take the rank of what they render as, so an inlined
    /// `a + b` is parenthesized like the binary node it is.
    pub(crate) fn rank_of(&mut self, expr: &'a Expr) -> Result<Rank, RenderError> {
        Ok(match expr {
            Expr::Binary { op, .. } => self.dialect.binary_rank(*op),
            Expr::Unary { op, fixity, .. } => self.dialect.unary_rank(*op, *fixity),
            Expr::Reference(id) => match self.names.binding(*id)? {
                Binding::Named(_) => Rank::PRIMARY,
                Binding::Inline(ctor) => self.ctor_rank(ctor)?,
            },
            Expr::Constructor(ctor) => self.ctor_rank(ctor)?,
            _ => expr.intrinsic_rank().unwrap_or(Rank::PRIMARY),
        })
    }

    fn ctor_rank(&mut self, ctor: &'a Constructor) -> Result<Rank, RenderError> {
        if let Some(arg) = ctor.pass_through() {
            return self.rank_of(arg);
        }
        if ctor.flags.contains(CtorFlags::PARENTHESIS) {
            return Ok(Rank::POSTFIX);
        }
        match ctor.args.as_slice() {
            [only] => self.rank_of(only),
            _ => Ok(Rank::COMMA),
        }
    }

    pub(crate) fn write_expr(&mut self, out: &mut String, expr: &'a Expr) -> Result<(), RenderError> {
        match expr {
            Expr::Literal(lit) => out.push_str(&self.dialect.literal(*lit)),
            Expr::Reference(id) => match self.names.binding(*id)? {
                Binding::Named(name) => out.push_str(&name),
                Binding::Inline(ctor) => self.write_ctor_value(out, ctor)?,
            },
            Expr::Constructor(ctor) => self.write_ctor_value(out, ctor)?,
            Expr::Binary { op, lhs, rhs } => {
                let rank = self.dialect.binary_rank(*op);
                let assoc = op.assoc();
                self.write_operand(out, lhs, rank, assoc == Assoc::Right)?;
                out.push(' ');
                out.push_str(self.dialect.binary_symbol(*op));
                out.push(' ');
                self.write_operand(out, rhs, rank, assoc == Assoc::Left)?;
            }
            Expr::Unary {
                op,
                operand,
                fixity,
            } => {
                let rank = self.dialect.unary_rank(*op, *fixity);
                match fixity {
                    Fixity::Prefix => {
                        out.push_str(self.dialect.unary_symbol(*op));
                        self.write_operand(out, operand, rank, true)?;
                    }
                    Fixity::Postfix => {
                        self.write_operand(out, operand, rank, false)?;
                        out.push_str(self.dialect.unary_symbol(*op));
                    }
                }
            }
            Expr::Ternary {
                cond,
                then,
                otherwise,
            } => {
                self.write_operand(out, cond, Rank::TERNARY, true)?;
                out.push_str(" ? ");
                self.write_operand(out, then, Rank::LOWEST, false)?;
                out.push_str(" : ");
                self.write_operand(out, otherwise, Rank::TERNARY, false)?;
            }
            Expr::Subscript { object, index } => {
                self.write_operand(out, object, Rank::POSTFIX, false)?;
                out.push('[');
                self.write_operand(out, index, Rank::LOWEST, false)?;
                out.push(']');
            }
            Expr::Member { object, member } => {
                self.write_operand(out, object, Rank::POSTFIX, false)?;
                out.push('.');
                out.push_str(member);
            }
            Expr::Swizzle { object, components } => {
                self.write_operand(out, object, Rank::POSTFIX, false)?;
                out.push('.');
                out.extend(components.iter().map(|c| c.as_char()));
            }
            Expr::Call { callee, args } => {
                match callee {
                    Callee::Builtin(name) => out.push_str(&self.dialect.builtin(name)),
                    Callee::Function(id) => out.push_str(&self.names.name_of(*id)?),
                }
                self.write_args(out, args)?;
            }
        }
        Ok(())
    }

    fn write_operand(
        &mut self,
        out: &mut String,
        expr: &'a Expr,
        parent: Rank,
        wrap_on_tie: bool,
    ) -> Result<(), RenderError> {
        let child = self.rank_of(expr)?;
        let wrap = Rank::needs_parens(parent, child) || (wrap_on_tie && child == parent);
        if wrap {
            out.push('(');
        }
        self.write_expr(out, expr)?;
        if wrap {
            out.push(')');
        }
        Ok(())
    }

    /// `(a, b, c)`
    fn write_args(&mut self, out: &mut String, args: &'a [Expr]) -> Result<(), RenderError> {
        out.push('(');
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_operand(out, arg, ARGUMENT, false)?;
        }
        out.push(')');
        Ok(())
    }

    fn write_ctor_value(
        &mut self,
        out: &mut String,
        ctor: &'a Constructor,
    ) -> Result<(), RenderError> {
        if let Some(arg) = ctor.pass_through() {
            return self.write_expr(out, arg);
        }
        let parenthesized = ctor.flags.contains(CtorFlags::PARENTHESIS);
        if !ctor.has_value() && !parenthesized {
            return Err(RenderError::InvalidConstructor { var: ctor.var });
        }
        if ctor.flags.contains(CtorFlags::DISPLAY_TYPE) {
            out.push_str(&self.dialect.type_name(&ctor.ty));
        }
        if parenthesized {
            return self.write_args(out, &ctor.args);
        }
        match ctor.args.as_slice() {
            [only] => self.write_expr(out, only),
            args => {
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_operand(out, arg, ARGUMENT, false)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests;
