//! HLSL, shader model 5.1.
//!
//! Texture sampling is a method on the texture object there
//! (`image.Sample(state, uv)`), with no free-function form to map
//! `texture` onto, so `texture` calls keep their name.

use std::borrow::Cow;

use vesl_ir::{BinaryOp, Qualifier, Rank, SamplerDim, TypeDesc};

use super::{Dialect, InterfaceStyle};

#[derive(Copy, Clone, Debug, Default)]
pub struct Hlsl;

impl Dialect for Hlsl {
    fn name(&self) -> &'static str {
        "hlsl"
    }

    fn binary_symbol(&self, op: BinaryOp) -> &'static str {
        match op {
            // No logical xor; on booleans it is inequality.
            BinaryOp::Xor => "!=",
            _ => op.as_symbol(),
        }
    }

    fn binary_rank(&self, op: BinaryOp) -> Rank {
        match op {
            BinaryOp::Xor => Rank::EQUALITY,
            _ => op.rank(),
        }
    }

    fn type_name(&self, ty: &TypeDesc) -> String {
        match ty {
            TypeDesc::Void => "void".to_owned(),
            TypeDesc::Scalar(kind) => self.scalar_name(*kind).to_owned(),
            TypeDesc::Vector(kind, n) => format!("{}{n}", self.scalar_name(*kind)),
            // HLSL spells rows first.
            TypeDesc::Matrix { scalar, cols, rows } => {
                format!("{}{rows}x{cols}", self.scalar_name(*scalar))
            }
            TypeDesc::Sampler(dim) => match dim {
                SamplerDim::D1 => "Texture1D",
                SamplerDim::D2 | SamplerDim::D2Shadow => "Texture2D",
                SamplerDim::D3 => "Texture3D",
                SamplerDim::Cube => "TextureCube",
                SamplerDim::D2Array => "Texture2DArray",
            }
            .to_owned(),
            TypeDesc::Array(elem, Some(len)) => format!("{}[{len}]", self.type_name(elem)),
            TypeDesc::Array(elem, None) => format!("{}[]", self.type_name(elem)),
            TypeDesc::Struct(name) => name.clone(),
        }
    }

    fn qualifier(&self, qualifier: Qualifier) -> &'static str {
        match qualifier {
            Qualifier::In => "in",
            Qualifier::Out => "out",
            Qualifier::InOut => "inout",
            Qualifier::Uniform => "uniform",
            Qualifier::Const => "static const",
            Qualifier::Shared => "groupshared",
        }
    }

    fn double_suffix(&self) -> &'static str {
        "L"
    }

    fn builtin<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match name {
            "mix" => Cow::Borrowed("lerp"),
            "fract" => Cow::Borrowed("frac"),
            "inversesqrt" => Cow::Borrowed("rsqrt"),
            "dFdx" => Cow::Borrowed("ddx"),
            "dFdy" => Cow::Borrowed("ddy"),
            "mod" => Cow::Borrowed("fmod"),
            _ => Cow::Borrowed(name),
        }
    }

    fn interface_style(&self) -> InterfaceStyle {
        InterfaceStyle::ConstantBuffer
    }
}
