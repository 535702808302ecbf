//! Statement-level IR.
//!
//! Instructions are grouped into [`Block`](crate::Block)s. Instructions that
//! open a scope (branches, loops, functions) do not own their bodies
//! directly; they hold the [`BlockId`] of a child block in the same
//! [`IrTree`](crate::IrTree).

use crate::expr::{Expr, Literal};
use crate::types::{Qualifier, TypeDesc};
use crate::{BlockId, VarId};

/// One statement-level unit.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Expression statement. A constructor at this position is a variable
    /// declaration whose rendering depends on its lifecycle status.
    Statement(Expr),
    Return(ReturnStatement),
    Special(SpecialStatement),
    If(IfInstruction),
    For(ForInstruction),
    While(WhileInstruction),
    DoWhile(DoWhileInstruction),
    Switch(SwitchInstruction),
    Function(FuncDeclaration),
    Struct(StructDeclaration),
    Interface(InterfaceDeclaration),
}

impl Instruction {
    /// Short kind label for logs and errors.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Instruction::Statement(_) => "statement",
            Instruction::Return(_) => "return",
            Instruction::Special(_) => "special",
            Instruction::If(_) => "if",
            Instruction::For(_) => "for",
            Instruction::While(_) => "while",
            Instruction::DoWhile(_) => "do-while",
            Instruction::Switch(_) => "switch",
            Instruction::Function(_) => "function",
            Instruction::Struct(_) => "struct",
            Instruction::Interface(_) => "interface",
        }
    }

    /// The constructor declared by this instruction, if any.
    pub fn as_constructor(&self) -> Option<&crate::Constructor> {
        match self {
            Instruction::Statement(expr) => expr.as_constructor(),
            _ => None,
        }
    }
}

/// A recorded mismatch between a returned value and the declared return
/// type of the enclosing function.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReturnMismatch {
    pub expected: TypeDesc,
    pub found: TypeDesc,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ReturnStatement {
    pub value: Option<Expr>,
    pub mismatch: Option<ReturnMismatch>,
}

/// Keyword statements.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpecialStatement {
    Break,
    Continue,
    Discard,
    /// Vendor-specific statement, rendered verbatim.
    Vendor(String),
}

/// One arm of an if chain. A `None` condition is the terminal `else`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfCase {
    pub condition: Option<Expr>,
    pub body: BlockId,
}

/// An `if` / `else if` / `else` chain.
///
/// Invariant: only the last case may have no condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfInstruction {
    pub cases: Vec<IfCase>,
}

impl IfInstruction {
    /// Check whether the chain already ended with an `else`.
    pub fn has_else(&self) -> bool {
        self.cases.last().is_some_and(|case| case.condition.is_none())
    }
}

/// Which condition wins when a for header has both a captured boolean
/// constructor and a stacked condition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ForConditionPolicy {
    #[default]
    PreferCaptured,
    PreferStacked,
}

/// Pre-separated for-loop clauses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ForClauses {
    pub inits: Vec<Expr>,
    pub condition: Option<Expr>,
    pub increments: Vec<Expr>,
}

/// How a for loop's header was supplied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ForHeader {
    /// Header statements recorded into an args block, partitioned into
    /// init/condition/increment at render time.
    Recorded {
        args: BlockId,
        stacked_condition: Option<Expr>,
        policy: ForConditionPolicy,
    },
    /// Clauses supplied directly by the front end.
    Clauses(ForClauses),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ForInstruction {
    pub header: ForHeader,
    pub body: BlockId,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WhileInstruction {
    pub condition: Expr,
    pub body: BlockId,
}

/// `do { body } while (condition);`. The condition is only known once the
/// body has been closed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DoWhileInstruction {
    pub body: BlockId,
    pub condition: Option<Expr>,
}

/// One `case` of a switch; a `None` label is `default`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwitchCase {
    pub label: Option<Literal>,
    pub body: BlockId,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SwitchInstruction {
    pub selector: Expr,
    pub cases: Vec<SwitchCase>,
}

/// One overload of a function: its own argument block and body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Overload {
    pub params: Vec<TypeDesc>,
    pub args: BlockId,
    pub body: BlockId,
}

/// A function with one or more overloads sharing a name and return type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FuncDeclaration {
    pub var: VarId,
    pub name: String,
    pub return_type: TypeDesc,
    pub overloads: Vec<Overload>,
}

/// A named, typed member of a struct or interface block.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub ty: TypeDesc,
    pub name: String,
}

impl Field {
    pub fn new(ty: TypeDesc, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StructDeclaration {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Interface block such as a uniform block: `uniform Name { ... } instance;`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceDeclaration {
    pub var: VarId,
    pub qualifier: Qualifier,
    pub block_name: String,
    pub fields: Vec<Field>,
}
