//! Render errors.
//!
//! Rendering a tree produced by a successful build never fails. These
//! errors mean the tree and the registry disagree, and are fatal.

use vesl_ir::{BlockId, VarId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("reference to unregistered variable {0}")]
    UnregisteredVariable(VarId),

    #[error("unknown block {0:?}")]
    UnknownBlock(BlockId),

    /// A declaration has no value, so it cannot stand in for one.
    #[error("constructor of {var} has no value to inline")]
    InvalidConstructor { var: VarId },

    #[error("{kind} is not allowed in {context}")]
    Misplaced {
        kind: &'static str,
        context: &'static str,
    },

    #[error("do-while loop was never given a condition")]
    MissingLoopCondition,
}
