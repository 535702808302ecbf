#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use vesl_ir::{BlockId, Callee};

use super::*;

fn func(ctx: &BuildContext, index: usize) -> &FuncDeclaration {
    match &ctx.tree().root().instructions()[index] {
        Instruction::Function(func) => func,
        other => panic!("expected function, got {other:?}"),
    }
}

#[test]
fn parameters_fill_signature_then_body() {
    let mut ctx = BuildContext::default();
    let f = ctx
        .begin_func_with("scale", TypeDesc::FLOAT, vec![TypeDesc::FLOAT, TypeDesc::FLOAT])
        .unwrap();
    let x = ctx.declare_param(TypeDesc::FLOAT, Some("x"), None).unwrap();
    // Still in the signature.
    assert_eq!(
        ctx.push_expression(Expr::int(0)).unwrap_err(),
        BuildError::NonArgumentInSignature {
            kind: "statement",
            function: "scale".into(),
            missing: 1,
        }
    );

    let mut ctx = BuildContext::default();
    ctx.begin_func_with("scale", TypeDesc::FLOAT, vec![TypeDesc::FLOAT, TypeDesc::FLOAT])
        .unwrap();
    let x2 = ctx.declare_param(TypeDesc::FLOAT, Some("x"), None).unwrap();
    let k = ctx.declare_param(TypeDesc::FLOAT, None, Some(Qualifier::In)).unwrap();
    let overload = &func(&ctx, 0).overloads[0];
    assert_eq!(ctx.current_block(), overload.body);
    assert_eq!(ctx.tree().block(overload.args).len(), 2);

    let lhs = ctx.var(x2).unwrap();
    let rhs = ctx.var(k).unwrap();
    ctx.return_value(Expr::binary(vesl_ir::BinaryOp::Mul, lhs, rhs), TypeDesc::FLOAT)
        .unwrap();
    ctx.end_func().unwrap();
    assert_eq!(ctx.current_block(), BlockId::ROOT);

    let record = ctx.registry().get(k).unwrap();
    assert!(record.is_disabled());
    assert_eq!(record.status(), CtorStatus::Declaration);
    assert_eq!((f.raw(), x.raw()), (0, 1));
}

#[test]
fn zero_parameters_go_straight_to_body() {
    let mut ctx = BuildContext::default();
    ctx.begin_func_with("main", TypeDesc::VOID, vec![]).unwrap();
    let body = func(&ctx, 0).overloads[0].body;
    assert_eq!(ctx.current_block(), body);
    ctx.discard().unwrap();
    ctx.end_func().unwrap();
    assert_eq!(ctx.tree().block(body).len(), 1);
}

#[test]
fn overloads_share_one_declaration() {
    let mut ctx = BuildContext::default();
    let f = ctx.begin_func("area", TypeDesc::FLOAT).unwrap();
    ctx.next_overload(vec![TypeDesc::FLOAT]).unwrap();
    ctx.declare_param(TypeDesc::FLOAT, Some("r"), None).unwrap();
    ctx.return_value(Expr::float(0.0), TypeDesc::FLOAT).unwrap();
    ctx.next_overload(vec![TypeDesc::vec(2)]).unwrap();
    ctx.declare_param(TypeDesc::vec(2), Some("size"), None).unwrap();
    ctx.return_value(Expr::float(1.0), TypeDesc::FLOAT).unwrap();
    ctx.end_func().unwrap();

    let decl = func(&ctx, 0);
    assert_eq!(decl.var, f);
    assert_eq!(decl.overloads.len(), 2);
    assert_eq!(decl.overloads[1].params, vec![TypeDesc::vec(2)]);
    assert_eq!(ctx.tree().root().len(), 1);

    let call = Expr::call(f, vec![Expr::float(2.0)]);
    assert!(matches!(call, Expr::Call { callee: Callee::Function(id), .. } if id == f));
}

#[test]
fn function_scope_errors() {
    let mut ctx = BuildContext::default();
    ctx.begin_func("f", TypeDesc::VOID).unwrap();
    assert_eq!(
        ctx.push_expression(Expr::int(1)).unwrap_err(),
        BuildError::NoOverload("f".into())
    );

    let mut ctx = BuildContext::default();
    ctx.begin_func_with("outer", TypeDesc::VOID, vec![]).unwrap();
    assert_eq!(
        ctx.begin_func("inner", TypeDesc::VOID).unwrap_err(),
        BuildError::NestedFunction("inner".into())
    );

    let mut ctx = BuildContext::default();
    assert_eq!(
        ctx.declare_param(TypeDesc::INT, None, None).unwrap_err(),
        BuildError::NotInSignature
    );

    let mut ctx = BuildContext::default();
    ctx.begin_func_with("g", TypeDesc::VOID, vec![TypeDesc::INT]).unwrap();
    assert_eq!(
        ctx.end_func().unwrap_err(),
        BuildError::NonArgumentInSignature {
            kind: "end_func",
            function: "g".into(),
            missing: 1,
        }
    );
}

#[test]
fn return_outside_function_is_an_error() {
    let mut ctx = BuildContext::default();
    assert_eq!(
        ctx.return_void().unwrap_err(),
        BuildError::NotInFunction("return")
    );
}

#[test]
fn return_mismatch_is_recorded_not_fatal() {
    let mut ctx = BuildContext::default();
    ctx.begin_func_with("f", TypeDesc::FLOAT, vec![]).unwrap();
    ctx.begin_if(Expr::bool(true)).unwrap();
    ctx.return_value(Expr::int(1), TypeDesc::INT).unwrap();
    ctx.end_if().unwrap();
    ctx.return_value(Expr::float(1.0), TypeDesc::FLOAT).unwrap();
    ctx.end_func().unwrap();
    assert!(ctx.failure().is_none());

    let body = func(&ctx, 0).overloads[0].body;
    let Instruction::If(chain) = &ctx.tree().block(body).instructions()[0] else {
        panic!("expected if");
    };
    let inner = ctx.tree().block(chain.cases[0].body);
    assert_eq!(
        inner.instructions()[0],
        Instruction::Return(ReturnStatement {
            value: Some(Expr::int(1)),
            mismatch: Some(ReturnMismatch {
                expected: TypeDesc::FLOAT,
                found: TypeDesc::INT,
            }),
        })
    );
    assert_eq!(
        ctx.tree().block(body).instructions()[1],
        Instruction::Return(ReturnStatement {
            value: Some(Expr::float(1.0)),
            mismatch: None,
        })
    );
}

#[test]
fn scoped_function_helper() {
    let mut ctx = BuildContext::default();
    let f = ctx
        .function(
            "double_it",
            TypeDesc::INT,
            &[(TypeDesc::INT, "n", None)],
            |ctx, params| {
                let n = ctx.var(params[0])?;
                ctx.return_value(Expr::binary(vesl_ir::BinaryOp::Add, n.clone(), n), TypeDesc::INT)
            },
        )
        .unwrap();
    assert_eq!(func(&ctx, 0).var, f);
    assert_eq!(ctx.depth(), 0);
}
