//! Binary and unary operators, and expression ranks.
//!
//! Symbols and ranks here are the C-family defaults shared by GLSL and HLSL.
//! A target dialect may override both; the code generator always asks the
//! dialect, never these tables directly.

use std::cmp::Ordering;

/// Binding strength of an expression node.
///
/// Higher levels bind tighter. A node nested under a parent of higher rank
/// must be parenthesized. Nodes whose precedence is not registered have an
/// `Undefined` rank and are always parenthesized when nested.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rank {
    Undefined,
    Level(u8),
}

impl Rank {
    /// Bracketed contexts: statement level, call arguments, subscripts.
    pub const LOWEST: Rank = Rank::Level(0);
    pub const COMMA: Rank = Rank::Level(1);
    pub const ASSIGN: Rank = Rank::Level(2);
    pub const TERNARY: Rank = Rank::Level(3);
    pub const LOGICAL_OR: Rank = Rank::Level(4);
    pub const LOGICAL_XOR: Rank = Rank::Level(5);
    pub const LOGICAL_AND: Rank = Rank::Level(6);
    pub const BIT_OR: Rank = Rank::Level(7);
    pub const BIT_XOR: Rank = Rank::Level(8);
    pub const BIT_AND: Rank = Rank::Level(9);
    pub const EQUALITY: Rank = Rank::Level(10);
    pub const RELATIONAL: Rank = Rank::Level(11);
    pub const SHIFT: Rank = Rank::Level(12);
    pub const ADDITIVE: Rank = Rank::Level(13);
    pub const MULTIPLICATIVE: Rank = Rank::Level(14);
    pub const PREFIX: Rank = Rank::Level(15);
    pub const POSTFIX: Rank = Rank::Level(16);
    pub const PRIMARY: Rank = Rank::Level(17);

    /// Decide whether `child` needs parentheses when nested under `parent`.
    ///
    /// - an `Undefined` child is always wrapped;
    /// - under an `Undefined` parent, anything looser than postfix is wrapped;
    /// - otherwise the child is wrapped iff it binds looser than the parent.
    pub fn needs_parens(parent: Rank, child: Rank) -> bool {
        match (parent, child) {
            (_, Rank::Undefined) => true,
            (Rank::Undefined, Rank::Level(c)) => Rank::Level(c) < Rank::POSTFIX,
            (Rank::Level(p), Rank::Level(c)) => c < p,
        }
    }
}

impl PartialOrd for Rank {
    /// `Undefined` is incomparable with every defined level.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Rank::Level(a), Rank::Level(b)) => Some(a.cmp(b)),
            (Rank::Undefined, Rank::Undefined) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

/// Operator associativity.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
}

/// Binary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,
    Xor,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShlAssign,
    ShrAssign,
}

impl BinaryOp {
    /// C-family spelling of this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "&&",
            Self::Or => "||",
            Self::Xor => "^^",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubAssign => "-=",
            Self::MulAssign => "*=",
            Self::DivAssign => "/=",
            Self::ModAssign => "%=",
            Self::BitAndAssign => "&=",
            Self::BitOrAssign => "|=",
            Self::BitXorAssign => "^=",
            Self::ShlAssign => "<<=",
            Self::ShrAssign => ">>=",
        }
    }

    /// C-family rank of this operator.
    pub const fn rank(self) -> Rank {
        match self {
            Self::Mul | Self::Div | Self::Mod => Rank::MULTIPLICATIVE,
            Self::Add | Self::Sub => Rank::ADDITIVE,
            Self::Shl | Self::Shr => Rank::SHIFT,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => Rank::RELATIONAL,
            Self::Eq | Self::NotEq => Rank::EQUALITY,
            Self::BitAnd => Rank::BIT_AND,
            Self::BitXor => Rank::BIT_XOR,
            Self::BitOr => Rank::BIT_OR,
            Self::And => Rank::LOGICAL_AND,
            Self::Xor => Rank::LOGICAL_XOR,
            Self::Or => Rank::LOGICAL_OR,
            Self::Assign
            | Self::AddAssign
            | Self::SubAssign
            | Self::MulAssign
            | Self::DivAssign
            | Self::ModAssign
            | Self::BitAndAssign
            | Self::BitOrAssign
            | Self::BitXorAssign
            | Self::ShlAssign
            | Self::ShrAssign => Rank::ASSIGN,
        }
    }

    /// Check for any assignment form.
    pub const fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::Assign
                | Self::AddAssign
                | Self::SubAssign
                | Self::MulAssign
                | Self::DivAssign
                | Self::ModAssign
                | Self::BitAndAssign
                | Self::BitOrAssign
                | Self::BitXorAssign
                | Self::ShlAssign
                | Self::ShrAssign
        )
    }

    /// Assignments group right to left, everything else left to right.
    pub const fn assoc(self) -> Assoc {
        if self.is_assignment() {
            Assoc::Right
        } else {
            Assoc::Left
        }
    }
}

/// Whether a unary operator is written before or after its operand.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fixity {
    Prefix,
    Postfix,
}

/// Unary operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Not,
    BitNot,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
            Self::BitNot => "~",
            Self::Increment => "++",
            Self::Decrement => "--",
        }
    }

    /// C-family rank for the given fixity.
    pub const fn rank(self, fixity: Fixity) -> Rank {
        match fixity {
            Fixity::Prefix => Rank::PREFIX,
            Fixity::Postfix => Rank::POSTFIX,
        }
    }
}
