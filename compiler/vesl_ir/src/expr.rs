//! Expression nodes.
//!
//! An [`Expr`] is a tree: every node owns its operands through `Box`/`Vec`
//! and nothing is shared. The only back-edge is [`Expr::Reference`], which
//! holds a [`VarId`] lookup key into the variable registry.
//!
//! Floats are stored as `u64` bits so the whole tree is `Eq + Hash`.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::operators::{BinaryOp, Fixity, Rank, UnaryOp};
use crate::types::{Qualifier, TypeDesc};
use crate::VarId;

/// Literal value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Single precision, stored as `f64` bits.
    Float(u64),
    /// Double precision, stored as `f64` bits.
    Double(u64),
}

impl Literal {
    pub fn float(value: f64) -> Self {
        Literal::Float(value.to_bits())
    }

    pub fn double(value: f64) -> Self {
        Literal::Double(value.to_bits())
    }

    /// Negative numbers render with a leading `-` and bind like a prefix
    /// operator.
    pub fn is_negative(self) -> bool {
        match self {
            Literal::Int(n) => n < 0,
            Literal::Float(bits) | Literal::Double(bits) => f64::from_bits(bits).is_sign_negative(),
            Literal::Bool(_) | Literal::UInt(_) => false,
        }
    }
}

/// Lifecycle status of a constructed value.
///
/// The status stored on a [`Constructor`] node is the status it was built
/// with. The variable registry tracks the live status, which is what the
/// code generator reads for statement-level rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CtorStatus {
    /// Name only, no value yet: `T name;`.
    Declaration,
    /// Name bound to a value: `T name = value;`.
    Initialisation,
    /// Inlined at its use site; no statement of its own.
    Temporary,
    /// Merely forwards another expression; resolved by later use.
    Forward,
}

bitflags! {
    /// Rendering flags carried by a [`Constructor`].
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CtorFlags: u8 {
        /// Spell the type name before the argument list: `vec3(...)`.
        const DISPLAY_TYPE = 1;
        /// Wrap the argument list in parentheses.
        const PARENTHESIS = 1 << 1;
        /// Later declaration in a for-loop init list: type name omitted.
        const MULTIPLE_INITS = 1 << 2;
        /// Function parameter slot inside an argument block.
        const FUNCTION_ARGUMENT = 1 << 3;
    }
}

impl CtorFlags {
    /// Call-style construction: `Type(args)`.
    pub const CALL: CtorFlags = CtorFlags::DISPLAY_TYPE.union(CtorFlags::PARENTHESIS);
}

/// A constructed value: the IR node behind every named or temporary
/// variable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Constructor {
    pub var: VarId,
    pub ty: TypeDesc,
    pub status: CtorStatus,
    pub flags: CtorFlags,
    pub qualifier: Option<Qualifier>,
    pub args: Vec<Expr>,
}

impl Constructor {
    /// A forwarding constructor with a single argument collapses to that
    /// argument wherever it is inlined.
    pub fn pass_through(&self) -> Option<&Expr> {
        match (self.status, self.args.as_slice()) {
            (CtorStatus::Forward, [only]) => Some(only),
            _ => None,
        }
    }

    /// Check whether this constructor has a value to inline.
    #[inline]
    pub fn has_value(&self) -> bool {
        !self.args.is_empty()
    }
}

/// Target of a function call.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Callee {
    /// Dialect builtin or externally defined function, spelled verbatim.
    Builtin(String),
    /// Function declared in this build, resolved through the name table.
    Function(VarId),
}

/// A swizzle component.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    X,
    Y,
    Z,
    W,
}

impl Component {
    pub const fn as_char(self) -> char {
        match self {
            Component::X => 'x',
            Component::Y => 'y',
            Component::Z => 'z',
            Component::W => 'w',
        }
    }

    /// Parse a single `xyzw`/`rgba` component letter.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'r' | 's' => Some(Component::X),
            'y' | 'g' | 't' => Some(Component::Y),
            'z' | 'b' | 'p' => Some(Component::Z),
            'w' | 'a' | 'q' => Some(Component::W),
            _ => None,
        }
    }
}

pub type Components = SmallVec<[Component; 4]>;

/// Expression node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expr {
    Literal(Literal),
    Reference(VarId),
    Constructor(Box<Constructor>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        fixity: Fixity,
    },
    Ternary {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    Subscript {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Member {
        object: Box<Expr>,
        member: String,
    },
    Swizzle {
        object: Box<Expr>,
        components: Components,
    },
    Call {
        callee: Callee,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn prefix(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            fixity: Fixity::Prefix,
        }
    }

    pub fn postfix(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            fixity: Fixity::Postfix,
        }
    }

    pub fn ternary(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn subscript(object: Expr, index: Expr) -> Self {
        Expr::Subscript {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    pub fn member(object: Expr, member: impl Into<String>) -> Self {
        Expr::Member {
            object: Box::new(object),
            member: member.into(),
        }
    }

    /// Swizzle by component letters. Unknown letters are skipped.
    pub fn swizzle(object: Expr, pattern: &str) -> Self {
        Expr::Swizzle {
            object: Box::new(object),
            components: pattern.chars().filter_map(Component::from_char).collect(),
        }
    }

    pub fn builtin(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Callee::Builtin(name.into()),
            args,
        }
    }

    pub fn call(function: VarId, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Callee::Function(function),
            args,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        Expr::binary(BinaryOp::Assign, target, value)
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Int(value))
    }

    pub fn uint(value: u64) -> Self {
        Expr::Literal(Literal::UInt(value))
    }

    pub fn float(value: f64) -> Self {
        Expr::Literal(Literal::float(value))
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal(Literal::Bool(value))
    }

    /// The constructor behind this node, if it is one.
    pub fn as_constructor(&self) -> Option<&Constructor> {
        match self {
            Expr::Constructor(ctor) => Some(ctor),
            _ => None,
        }
    }

    /// Rank that does not depend on the target dialect or on variable
    /// lifecycle.
    ///
    /// Returns `None` for operators (ranked by the dialect table) and for
    /// references and constructors (ranked by what they render as).
    pub fn intrinsic_rank(&self) -> Option<Rank> {
        match self {
            Expr::Literal(lit) if lit.is_negative() => Some(Rank::PREFIX),
            Expr::Literal(_) => Some(Rank::PRIMARY),
            Expr::Subscript { .. }
            | Expr::Member { .. }
            | Expr::Swizzle { .. }
            | Expr::Call { .. } => Some(Rank::POSTFIX),
            Expr::Ternary { .. } => Some(Rank::TERNARY),
            Expr::Reference(_)
            | Expr::Constructor(_)
            | Expr::Binary { .. }
            | Expr::Unary { .. } => None,
        }
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

#[cfg(test)]
mod tests;
