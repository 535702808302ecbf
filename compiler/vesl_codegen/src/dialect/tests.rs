use std::borrow::Cow;

use pretty_assertions::assert_eq;
use vesl_ir::{SamplerDim, SpecialStatement};

use super::*;

#[test]
fn glsl_type_names() {
    let glsl = Glsl;
    assert_eq!(glsl.type_name(&TypeDesc::FLOAT), "float");
    assert_eq!(glsl.type_name(&TypeDesc::vec(3)), "vec3");
    assert_eq!(
        glsl.type_name(&TypeDesc::Vector(ScalarKind::Int, 2)),
        "ivec2"
    );
    assert_eq!(glsl.type_name(&TypeDesc::mat(4)), "mat4");
    assert_eq!(
        glsl.type_name(&TypeDesc::Matrix {
            scalar: ScalarKind::Float,
            cols: 3,
            rows: 2,
        }),
        "mat3x2"
    );
    assert_eq!(
        glsl.type_name(&TypeDesc::Sampler(SamplerDim::Cube)),
        "samplerCube"
    );
    assert_eq!(
        glsl.type_name(&TypeDesc::array(TypeDesc::FLOAT, 8)),
        "float[8]"
    );
}

#[test]
fn hlsl_type_names() {
    let hlsl = Hlsl;
    assert_eq!(hlsl.type_name(&TypeDesc::vec(3)), "float3");
    assert_eq!(hlsl.type_name(&TypeDesc::mat(4)), "float4x4");
    assert_eq!(
        hlsl.type_name(&TypeDesc::Matrix {
            scalar: ScalarKind::Float,
            cols: 3,
            rows: 2,
        }),
        "float2x3"
    );
    assert_eq!(
        hlsl.type_name(&TypeDesc::Vector(ScalarKind::UInt, 4)),
        "uint4"
    );
}

#[test]
fn array_declarators_put_extent_after_name() {
    let ty = TypeDesc::array(TypeDesc::vec(4), 3);
    assert_eq!(Glsl.declarator(&ty, "colors"), "vec4 colors[3]");
    assert_eq!(Hlsl.declarator(&ty, "colors"), "float4 colors[3]");
    assert_eq!(Glsl.declarator(&TypeDesc::INT, "n"), "int n");
}

#[test]
fn float_literals_always_look_like_floats() {
    assert_eq!(format_float(1.0), "1.0");
    assert_eq!(format_float(-2.0), "-2.0");
    assert_eq!(format_float(0.25), "0.25");
    assert_eq!(format_float(1e20), "100000000000000000000.0");
    assert_eq!(format_float(f64::NAN), "(0.0 / 0.0)");
    assert_eq!(format_float(f64::NEG_INFINITY), "(-1.0 / 0.0)");
}

#[test]
fn literal_suffixes() {
    assert_eq!(Glsl.literal(Literal::UInt(3)), "3u");
    assert_eq!(Glsl.literal(Literal::double(0.5)), "0.5lf");
    assert_eq!(Hlsl.literal(Literal::double(0.5)), "0.5L");
    assert_eq!(Glsl.literal(Literal::Int(-4)), "-4");
    assert_eq!(Glsl.literal(Literal::Bool(false)), "false");
}

#[test]
fn hlsl_overrides() {
    assert_eq!(Hlsl.builtin("mix"), Cow::Borrowed("lerp"));
    assert_eq!(Hlsl.builtin("sin"), Cow::Borrowed("sin"));
    assert_eq!(Hlsl.builtin("texture"), Cow::Borrowed("texture"));
    assert_eq!(Glsl.builtin("mix"), Cow::Borrowed("mix"));
    assert_eq!(Hlsl.binary_symbol(BinaryOp::Xor), "!=");
    assert_eq!(Glsl.binary_symbol(BinaryOp::Xor), "^^");
    assert_eq!(Hlsl.qualifier(Qualifier::Shared), "groupshared");
    assert_eq!(Hlsl.interface_style(), InterfaceStyle::ConstantBuffer);
    assert_eq!(Glsl.preamble(), Some("#version 450"));
    assert_eq!(Hlsl.preamble(), None);
}

#[test]
fn specials() {
    assert_eq!(Glsl.special(&SpecialStatement::Discard), "discard");
    let vendor = SpecialStatement::Vendor("#pragma optimize(off)".into());
    assert_eq!(Glsl.special(&vendor), "#pragma optimize(off)");
}
