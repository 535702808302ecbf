//! Target dialects.
//!
//! A [`Dialect`] supplies everything about the output language that the
//! generator does not hard-code: operator spellings and ranks, type names,
//! qualifier keywords, literal suffixes, builtin names and the preamble.
//! The defaults are the C-family tables shared by GLSL and HLSL; each
//! dialect overrides what differs.

mod glsl;
mod hlsl;

use std::borrow::Cow;

pub use glsl::Glsl;
pub use hlsl::Hlsl;

use vesl_ir::{
    BinaryOp, Fixity, Literal, Qualifier, Rank, ScalarKind, SpecialStatement, TypeDesc, UnaryOp,
};

/// How interface blocks are spelled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InterfaceStyle {
    /// `uniform Name { ... } instance;`
    Block,
    /// `struct Name { ... };` followed by `ConstantBuffer<Name> instance;`
    ConstantBuffer,
}

pub trait Dialect {
    /// Short name, e.g. `glsl`.
    fn name(&self) -> &'static str;

    /// Line emitted before everything else, if any.
    fn preamble(&self) -> Option<&str> {
        None
    }

    fn binary_symbol(&self, op: BinaryOp) -> &'static str {
        op.as_symbol()
    }

    /// Rank of a binary operator. [`Rank::Undefined`] forces parentheses
    /// wherever the operator is nested.
    fn binary_rank(&self, op: BinaryOp) -> Rank {
        op.rank()
    }

    fn unary_symbol(&self, op: UnaryOp) -> &'static str {
        op.as_symbol()
    }

    fn unary_rank(&self, op: UnaryOp, fixity: Fixity) -> Rank {
        op.rank(fixity)
    }

    fn scalar_name(&self, kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::UInt => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    /// Spelling of a type in expression position, e.g. a constructor call.
    fn type_name(&self, ty: &TypeDesc) -> String;

    /// `T name` for a declaration. Arrays put the extent after the name.
    fn declarator(&self, ty: &TypeDesc, name: &str) -> String {
        match ty {
            TypeDesc::Array(elem, Some(len)) => format!("{} {name}[{len}]", self.type_name(elem)),
            TypeDesc::Array(elem, None) => format!("{} {name}[]", self.type_name(elem)),
            _ => format!("{} {name}", self.type_name(ty)),
        }
    }

    fn qualifier(&self, qualifier: Qualifier) -> &'static str {
        match qualifier {
            Qualifier::In => "in",
            Qualifier::Out => "out",
            Qualifier::InOut => "inout",
            Qualifier::Uniform => "uniform",
            Qualifier::Const => "const",
            Qualifier::Shared => "shared",
        }
    }

    /// Suffix of a double-precision literal.
    fn double_suffix(&self) -> &'static str;

    fn literal(&self, lit: Literal) -> String {
        match lit {
            Literal::Bool(value) => value.to_string(),
            Literal::Int(value) => value.to_string(),
            Literal::UInt(value) => format!("{value}u"),
            Literal::Float(bits) => format_float(f64::from_bits(bits)),
            Literal::Double(bits) => {
                let value = f64::from_bits(bits);
                if value.is_finite() {
                    format!("{}{}", format_float(value), self.double_suffix())
                } else {
                    format_float(value)
                }
            }
        }
    }

    /// Spelling of a builtin function.
    fn builtin<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }

    /// Keyword statement, without the trailing `;`.
    fn special<'a>(&self, stmt: &'a SpecialStatement) -> Cow<'a, str> {
        match stmt {
            SpecialStatement::Break => Cow::Borrowed("break"),
            SpecialStatement::Continue => Cow::Borrowed("continue"),
            SpecialStatement::Discard => Cow::Borrowed("discard"),
            SpecialStatement::Vendor(text) => Cow::Borrowed(text),
        }
    }

    fn interface_style(&self) -> InterfaceStyle {
        InterfaceStyle::Block
    }
}

/// Float literal text that always reads back as floating point.
///
/// Non-finite values have no literal form and are spelled as the division
/// that produces them.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "(0.0 / 0.0)".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "(1.0 / 0.0)".to_owned()
        } else {
            "(-1.0 / 0.0)".to_owned()
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests;
