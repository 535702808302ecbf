//! GLSL 4.50.

use vesl_ir::{SamplerDim, ScalarKind, TypeDesc};

use super::Dialect;

#[derive(Copy, Clone, Debug, Default)]
pub struct Glsl;

fn vector_prefix(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Bool => "b",
        ScalarKind::Int => "i",
        ScalarKind::UInt => "u",
        ScalarKind::Float => "",
        ScalarKind::Double => "d",
    }
}

impl Dialect for Glsl {
    fn name(&self) -> &'static str {
        "glsl"
    }

    fn preamble(&self) -> Option<&str> {
        Some("#version 450")
    }

    fn type_name(&self, ty: &TypeDesc) -> String {
        match ty {
            TypeDesc::Void => "void".to_owned(),
            TypeDesc::Scalar(kind) => self.scalar_name(*kind).to_owned(),
            TypeDesc::Vector(kind, n) => format!("{}vec{n}", vector_prefix(*kind)),
            TypeDesc::Matrix { scalar, cols, rows } if cols == rows => {
                format!("{}mat{cols}", vector_prefix(*scalar))
            }
            TypeDesc::Matrix { scalar, cols, rows } => {
                format!("{}mat{cols}x{rows}", vector_prefix(*scalar))
            }
            TypeDesc::Sampler(dim) => match dim {
                SamplerDim::D1 => "sampler1D",
                SamplerDim::D2 => "sampler2D",
                SamplerDim::D3 => "sampler3D",
                SamplerDim::Cube => "samplerCube",
                SamplerDim::D2Array => "sampler2DArray",
                SamplerDim::D2Shadow => "sampler2DShadow",
            }
            .to_owned(),
            TypeDesc::Array(elem, Some(len)) => format!("{}[{len}]", self.type_name(elem)),
            TypeDesc::Array(elem, None) => format!("{}[]", self.type_name(elem)),
            TypeDesc::Struct(name) => name.clone(),
        }
    }

    fn double_suffix(&self) -> &'static str {
        "lf"
    }
}
