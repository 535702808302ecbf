#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use vesl_build::{BuildContext, BuildOptions, Shader};
use vesl_ir::{BinaryOp, Instruction, Rank, TypeDesc, UnaryOp};

use super::*;
use crate::{Dialect, Glsl, RenderOptions};

fn empty_shader() -> Shader {
    BuildContext::default().finish().unwrap()
}

fn text(shader: &Shader, dialect: &dyn Dialect, expr: &Expr) -> String {
    let mut generator = Generator::new(shader, dialect, &RenderOptions::default());
    generator.expr(expr).unwrap()
}

fn glsl(expr: &Expr) -> String {
    text(&empty_shader(), &Glsl, expr)
}

fn int(value: i64) -> Expr {
    Expr::int(value)
}

#[test]
fn tighter_children_are_bare() {
    let expr = Expr::binary(
        BinaryOp::Add,
        int(1),
        Expr::binary(BinaryOp::Mul, int(2), int(3)),
    );
    assert_eq!(glsl(&expr), "1 + 2 * 3");
}

#[test]
fn looser_children_are_wrapped() {
    let expr = Expr::binary(
        BinaryOp::Mul,
        Expr::binary(BinaryOp::Add, int(1), int(2)),
        int(3),
    );
    assert_eq!(glsl(&expr), "(1 + 2) * 3");
}

#[test]
fn ties_wrap_against_associativity() {
    let left = Expr::binary(
        BinaryOp::Sub,
        Expr::binary(BinaryOp::Sub, int(1), int(2)),
        int(3),
    );
    assert_eq!(glsl(&left), "1 - 2 - 3");

    let right = Expr::binary(
        BinaryOp::Sub,
        int(1),
        Expr::binary(BinaryOp::Sub, int(2), int(3)),
    );
    assert_eq!(glsl(&right), "1 - (2 - 3)");
}

#[test]
fn nested_negation_keeps_its_parentheses() {
    let expr = Expr::prefix(UnaryOp::Neg, Expr::prefix(UnaryOp::Neg, int(1)));
    assert_eq!(glsl(&expr), "-(-1)");

    let literal = Expr::prefix(UnaryOp::Neg, int(-1));
    assert_eq!(glsl(&literal), "-(-1)");
}

#[test]
fn negative_literal_as_postfix_object_is_wrapped() {
    let expr = Expr::swizzle(Expr::float(-1.5), "x");
    assert_eq!(glsl(&expr), "(-1.5).x");
}

#[test]
fn ternary_operands() {
    let nested = Expr::ternary(
        Expr::ternary(Expr::bool(true), Expr::bool(false), Expr::bool(true)),
        int(1),
        Expr::ternary(Expr::bool(false), int(2), int(3)),
    );
    assert_eq!(glsl(&nested), "(true ? false : true) ? 1 : false ? 2 : 3");
}

#[test]
fn call_arguments_wrap_only_comma_lists() {
    let expr = Expr::builtin(
        "max",
        vec![Expr::binary(BinaryOp::Add, int(1), int(2)), int(3)],
    );
    assert_eq!(glsl(&expr), "max(1 + 2, 3)");
}

#[test]
fn member_of_binary_is_wrapped() {
    let expr = Expr::member(Expr::binary(BinaryOp::Add, int(1), int(2)), "x");
    assert_eq!(glsl(&expr), "(1 + 2).x");
}

struct Strict;

impl Dialect for Strict {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn binary_rank(&self, op: BinaryOp) -> Rank {
        match op {
            BinaryOp::BitXor => Rank::Undefined,
            op => op.rank(),
        }
    }

    fn type_name(&self, ty: &TypeDesc) -> String {
        Glsl.type_name(ty)
    }

    fn double_suffix(&self) -> &'static str {
        ""
    }
}

#[test]
fn undefined_rank_is_always_wrapped() {
    let inner = Expr::binary(BinaryOp::BitXor, int(1), int(2));
    let expr = Expr::binary(BinaryOp::Or, inner.clone(), int(3));
    let shader = empty_shader();
    assert_eq!(text(&shader, &Strict, &expr), "(1 ^ 2) || 3");
    // At the top there is nothing to bind against.
    assert_eq!(text(&shader, &Strict, &inner), "1 ^ 2");
}

#[test]
fn consumed_values_are_inlined_with_their_rank() {
    let mut ctx = BuildContext::default();
    let sum = ctx
        .forward(TypeDesc::INT, Expr::binary(BinaryOp::Add, int(1), int(2)))
        .unwrap();
    let operand = ctx.consume(sum).unwrap();
    let product = Expr::binary(BinaryOp::Mul, operand, int(3));
    ctx.push_expression(product.clone()).unwrap();
    let shader = ctx.finish().unwrap();

    assert_eq!(text(&shader, &Glsl, &product), "(1 + 2) * 3");
}

#[test]
fn named_values_render_as_names() {
    let mut ctx = BuildContext::new(BuildOptions::default());
    let speed = ctx
        .construct_named(TypeDesc::FLOAT, "speed", vec![Expr::float(2.0)])
        .unwrap();
    let reference = ctx.var(speed).unwrap();
    let shader = ctx.finish().unwrap();

    let expr = Expr::binary(BinaryOp::Mul, reference, Expr::float(0.5));
    assert_eq!(text(&shader, &Glsl, &expr), "speed * 0.5");
}

#[test]
fn declaration_cannot_be_inlined() {
    let mut ctx = BuildContext::default();
    let var = ctx.declare(TypeDesc::FLOAT, None).unwrap();
    let shader = ctx.finish().unwrap();

    let mut generator = Generator::new(&shader, &Glsl, &RenderOptions::default());
    let Some(Instruction::Statement(Expr::Constructor(ctor))) =
        shader.tree().root().instructions().first()
    else {
        panic!("expected a declaration");
    };
    assert_eq!(
        generator.ctor_value(ctor),
        Err(RenderError::InvalidConstructor { var })
    );
}
