//! VESL IR - Intermediate Representation Types
//!
//! This crate contains the data structures shared by the shader builder and
//! the code generator:
//! - Ids for variables and blocks
//! - Resolved type descriptors
//! - The expression tree ([`Expr`]) and its operators
//! - The instruction tree ([`Instruction`]) grouped into [`Block`]s
//! - The block arena ([`IrTree`])
//!
//! # Design Philosophy
//!
//! - **Expressions are trees**: a node owns its operands; the only
//!   back-edge is [`Expr::Reference`], a [`VarId`] lookup key.
//! - **Blocks are flat**: scopes live in one arena and point at their
//!   parent by [`BlockId`], so the build cursor can walk upward without
//!   shared ownership.
//! - **Append only**: instructions are never reordered or removed once
//!   pushed.

mod block;
mod expr;
mod ids;
mod instr;
mod operators;
mod types;

pub use block::{Block, BlockKind, IrTree};
pub use expr::{Callee, Component, Components, Constructor, CtorFlags, CtorStatus, Expr, Literal};
pub use ids::{BlockId, InstrRef, VarId};
pub use instr::{
    DoWhileInstruction, Field, ForClauses, ForConditionPolicy, ForHeader, ForInstruction,
    FuncDeclaration, IfCase, IfInstruction, InterfaceDeclaration, Instruction, Overload,
    ReturnMismatch, ReturnStatement, SpecialStatement, StructDeclaration, SwitchCase,
    SwitchInstruction, WhileInstruction,
};
pub use operators::{Assoc, BinaryOp, Fixity, Rank, UnaryOp};
pub use types::{Qualifier, SamplerDim, ScalarKind, TypeDesc, VarCategory};
