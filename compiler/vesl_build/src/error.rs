//! Structural build errors.
//!
//! Every variant here breaks a cursor invariant, so none of them is
//! recoverable: the first one poisons the [`BuildContext`](crate::BuildContext)
//! and every later call reports [`BuildError::Poisoned`]. Return-type
//! mismatches are not errors; they are recorded on the `return` statement
//! and rendered as a comment.

use vesl_ir::{TypeDesc, VarId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// An `end_*` (or continuation such as `add_case`) without the matching
    /// open scope on top of the cursor.
    #[error("`{found}` called without a matching `{expected}`")]
    Unbalanced {
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{0}` has no open `if` to attach to")]
    ElseWithoutIf(&'static str),

    #[error("`{0}` after the terminal `else` of the same chain")]
    ElseAfterElse(&'static str),

    #[error("for loop is in the {phase} phase, `{found}` is not allowed there")]
    ForPhase {
        phase: &'static str,
        found: &'static str,
    },

    #[error("switch already has a `default` case")]
    DuplicateDefault,

    #[error("{0} pushed inside a switch before its first `add_case`")]
    OutsideCase(&'static str),

    #[error("{0} pushed into a for loop before `begin_for_args` or `begin_for_body`")]
    OutsideForPhase(&'static str),

    #[error("function `{0}` has no open overload; call `next_overload` first")]
    NoOverload(String),

    #[error("{kind} pushed while function `{function}` still expects {missing} argument(s)")]
    NonArgumentInSignature {
        kind: &'static str,
        function: String,
        missing: usize,
    },

    #[error("`declare_param` called outside of a function signature")]
    NotInSignature,

    #[error("function `{0}` declared inside another function")]
    NestedFunction(String),

    #[error("`{0}` outside of a function")]
    NotInFunction(&'static str),

    #[error("`{0}` outside of a loop")]
    NotInLoop(&'static str),

    #[error("unknown variable {0}")]
    UnknownVariable(VarId),

    #[error("constructor of type `{ty}` forwards {count} arguments; a forward wraps exactly one")]
    ForwardArity { ty: TypeDesc, count: usize },

    #[error("build finished with an unclosed `{0}`")]
    UnclosedScope(&'static str),

    #[error("build already failed: {0}")]
    Poisoned(Box<BuildError>),
}
