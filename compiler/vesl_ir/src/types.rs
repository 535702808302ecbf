//! Type descriptors.
//!
//! The front end resolves every type before it reaches the IR; the IR only
//! stores the resolved descriptor and asks the target dialect how to spell it.

use std::fmt;

/// Scalar component kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Float,
    Double,
}

/// Sampler dimensionality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SamplerDim {
    D1,
    D2,
    D3,
    Cube,
    D2Array,
    D2Shadow,
}

/// A fully resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Void,
    Scalar(ScalarKind),
    /// Vector with 2 to 4 components.
    Vector(ScalarKind, u8),
    /// Matrix with `cols` columns of `rows` rows.
    Matrix { scalar: ScalarKind, cols: u8, rows: u8 },
    Sampler(SamplerDim),
    /// Array of `elem`; `None` length is an unsized array.
    Array(Box<TypeDesc>, Option<u32>),
    /// User struct, by name.
    Struct(String),
}

impl TypeDesc {
    pub const VOID: TypeDesc = TypeDesc::Void;
    pub const BOOL: TypeDesc = TypeDesc::Scalar(ScalarKind::Bool);
    pub const INT: TypeDesc = TypeDesc::Scalar(ScalarKind::Int);
    pub const UINT: TypeDesc = TypeDesc::Scalar(ScalarKind::UInt);
    pub const FLOAT: TypeDesc = TypeDesc::Scalar(ScalarKind::Float);
    pub const DOUBLE: TypeDesc = TypeDesc::Scalar(ScalarKind::Double);

    /// Float vector of `n` components.
    pub const fn vec(n: u8) -> Self {
        TypeDesc::Vector(ScalarKind::Float, n)
    }

    /// Square float matrix.
    pub const fn mat(n: u8) -> Self {
        TypeDesc::Matrix {
            scalar: ScalarKind::Float,
            cols: n,
            rows: n,
        }
    }

    /// Sized array of `elem`.
    pub fn array(elem: TypeDesc, len: u32) -> Self {
        TypeDesc::Array(Box::new(elem), Some(len))
    }

    /// Named struct type.
    pub fn structure(name: impl Into<String>) -> Self {
        TypeDesc::Struct(name.into())
    }

    /// Check for the scalar `bool` type.
    ///
    /// For-loop header classification keys on this: only scalar booleans
    /// are loop conditions.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, TypeDesc::Scalar(ScalarKind::Bool))
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, TypeDesc::Void)
    }

    /// The naming category of a value of this type.
    pub fn category(&self) -> VarCategory {
        match self {
            TypeDesc::Scalar(_) => VarCategory::Scalar,
            TypeDesc::Vector(..) => VarCategory::Vector,
            TypeDesc::Matrix { .. } => VarCategory::Matrix,
            TypeDesc::Sampler(_) => VarCategory::Sampler,
            TypeDesc::Array(..) => VarCategory::Array,
            TypeDesc::Void | TypeDesc::Struct(_) => VarCategory::Other,
        }
    }
}

impl fmt::Display for TypeDesc {
    /// Dialect-neutral spelling, used in diagnostics only.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDesc::Void => write!(f, "void"),
            TypeDesc::Scalar(s) => write!(f, "{}", scalar_label(*s)),
            TypeDesc::Vector(s, n) => write!(f, "{}{n}", scalar_label(*s)),
            TypeDesc::Matrix { scalar, cols, rows } => {
                write!(f, "{}{cols}x{rows}", scalar_label(*scalar))
            }
            TypeDesc::Sampler(dim) => write!(f, "sampler{dim:?}"),
            TypeDesc::Array(elem, Some(len)) => write!(f, "{elem}[{len}]"),
            TypeDesc::Array(elem, None) => write!(f, "{elem}[]"),
            TypeDesc::Struct(name) => write!(f, "{name}"),
        }
    }
}

fn scalar_label(s: ScalarKind) -> &'static str {
    match s {
        ScalarKind::Bool => "bool",
        ScalarKind::Int => "int",
        ScalarKind::UInt => "uint",
        ScalarKind::Float => "float",
        ScalarKind::Double => "double",
    }
}

/// Category of a variable. Drives auto naming when no explicit name was
/// given.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarCategory {
    Scalar,
    Vector,
    Matrix,
    Sampler,
    Array,
    Function,
    Other,
}

impl VarCategory {
    /// Number of categories (size of per-category counter tables).
    pub const COUNT: usize = 7;

    /// Prefix for auto-generated names.
    pub const fn prefix(self) -> &'static str {
        match self {
            VarCategory::Scalar => "x",
            VarCategory::Vector => "v",
            VarCategory::Matrix => "m",
            VarCategory::Sampler => "s",
            VarCategory::Array => "a",
            VarCategory::Function => "f",
            VarCategory::Other => "o",
        }
    }

    /// Dense index for counter tables.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Storage/parameter qualifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Qualifier {
    In,
    Out,
    InOut,
    Uniform,
    Const,
    Shared,
}

#[cfg(test)]
mod tests;
