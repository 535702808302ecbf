#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use vesl_ir::{BinaryOp, CtorStatus, Expr, ForConditionPolicy, Instruction, TypeDesc};

use super::*;

fn ctor_at(ctx: &BuildContext, block: BlockId, index: usize) -> &Constructor {
    ctx.tree()
        .instruction(InstrRef::new(block, index))
        .and_then(Instruction::as_constructor)
        .unwrap()
}

#[test]
fn pushes_land_in_call_order() {
    let mut ctx = BuildContext::default();
    let a = ctx.construct(TypeDesc::FLOAT, vec![Expr::float(1.0)]).unwrap();
    let b = ctx.declare(TypeDesc::vec(3), Some("dir")).unwrap();
    ctx.push_expression(Expr::int(7)).unwrap();

    let root = ctx.tree().root();
    assert_eq!(root.len(), 3);
    assert_eq!(ctor_at(&ctx, BlockId::ROOT, 0).var, a);
    assert_eq!(ctor_at(&ctx, BlockId::ROOT, 1).var, b);
    assert_eq!(
        root.instructions()[2],
        Instruction::Statement(Expr::int(7))
    );
}

#[test]
fn constructor_shapes() {
    let mut ctx = BuildContext::default();
    ctx.construct(TypeDesc::vec(2), vec![Expr::float(0.0), Expr::float(1.0)])
        .unwrap();
    ctx.declare(TypeDesc::INT, None).unwrap();
    ctx.forward(TypeDesc::INT, Expr::int(3)).unwrap();

    let init = ctor_at(&ctx, BlockId::ROOT, 0);
    assert_eq!(init.status, CtorStatus::Initialisation);
    assert_eq!(init.flags, CtorFlags::CALL);
    assert_eq!(init.args.len(), 2);

    let decl = ctor_at(&ctx, BlockId::ROOT, 1);
    assert_eq!(decl.status, CtorStatus::Declaration);
    assert!(decl.args.is_empty());

    let fwd = ctor_at(&ctx, BlockId::ROOT, 2);
    assert_eq!(fwd.status, CtorStatus::Forward);
    assert_eq!(fwd.pass_through(), Some(&Expr::int(3)));
}

#[test]
fn forward_requires_exactly_one_argument() {
    let mut ctx = BuildContext::default();
    let err = ctx
        .emit(CtorSpec::new(TypeDesc::FLOAT, CtorStatus::Forward))
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::ForwardArity {
            ty: TypeDesc::FLOAT,
            count: 0,
        }
    );
}

#[test]
fn var_and_consume_update_registry() {
    let mut ctx = BuildContext::default();
    let named = ctx.construct(TypeDesc::FLOAT, vec![Expr::float(1.0)]).unwrap();
    let inlined = ctx.construct(TypeDesc::FLOAT, vec![Expr::float(2.0)]).unwrap();

    let lhs = ctx.var(named).unwrap();
    let rhs = ctx.consume(inlined).unwrap();
    ctx.push_expression(Expr::binary(BinaryOp::Add, lhs, rhs))
        .unwrap();

    assert_eq!(
        ctx.registry().status(named),
        Some(CtorStatus::Initialisation)
    );
    assert_eq!(ctx.registry().status(inlined), Some(CtorStatus::Temporary));
}

#[test]
fn inline_ctor_is_not_pushed() {
    let mut ctx = BuildContext::default();
    let expr = ctx
        .inline_ctor(TypeDesc::vec(4), vec![Expr::float(1.0)])
        .unwrap();
    assert!(ctx.tree().root().is_empty());
    let ctor = expr.as_constructor().unwrap();
    assert_eq!(ctor.status, CtorStatus::Temporary);
    assert!(ctx.registry().get(ctor.var).unwrap().is_disabled());
}

#[test]
fn unknown_variable_poisons_context() {
    let mut ctx = BuildContext::default();
    let ghost = VarId::new(99);
    assert_eq!(ctx.var(ghost), Err(BuildError::UnknownVariable(ghost)));
    assert_eq!(ctx.failure(), Some(&BuildError::UnknownVariable(ghost)));

    // Every later call reports the first failure.
    let err = ctx.push_expression(Expr::int(1)).unwrap_err();
    assert_eq!(
        err,
        BuildError::Poisoned(Box::new(BuildError::UnknownVariable(ghost)))
    );
    assert!(ctx.tree().root().is_empty());
}

#[test]
fn reset_clears_everything() {
    let mut ctx = BuildContext::default();
    ctx.construct(TypeDesc::FLOAT, vec![Expr::float(1.0)]).unwrap();
    ctx.begin_while(Expr::bool(true)).unwrap();
    let _ = ctx.end_for();
    assert!(ctx.failure().is_some());

    ctx.reset();
    assert!(ctx.failure().is_none());
    assert_eq!(ctx.depth(), 0);
    assert_eq!(ctx.current_block(), BlockId::ROOT);
    assert_eq!(ctx.tree().len(), 1);
    assert!(ctx.registry().is_empty());
    let fresh = ctx.declare(TypeDesc::INT, None).unwrap();
    assert_eq!(fresh.raw(), 0);
}

#[test]
fn finish_rejects_open_scopes() {
    let mut ctx = BuildContext::default();
    ctx.begin_while(Expr::bool(true)).unwrap();
    assert_eq!(
        ctx.finish().unwrap_err(),
        BuildError::UnclosedScope("while")
    );
}

#[test]
fn finish_settles_waiting_if() {
    let mut ctx = BuildContext::default();
    ctx.begin_if(Expr::bool(true)).unwrap();
    ctx.end_if_sub_block().unwrap();
    assert_eq!(ctx.depth(), 1);
    let shader = ctx.finish().unwrap();
    assert_eq!(shader.tree().root().len(), 1);
}

#[test]
fn finish_elides_dead_declarations() {
    let mut ctx = BuildContext::default();
    let dead = ctx.construct(TypeDesc::FLOAT, vec![Expr::float(1.0)]).unwrap();
    let shader = ctx.finish().unwrap();
    assert_eq!(shader.registry().status(dead), Some(CtorStatus::Temporary));

    let mut ctx = BuildContext::new(BuildOptions::default().with_dead_declaration_elision(false));
    let kept = ctx.construct(TypeDesc::FLOAT, vec![Expr::float(1.0)]).unwrap();
    let shader = ctx.finish().unwrap();
    assert_eq!(
        shader.registry().status(kept),
        Some(CtorStatus::Initialisation)
    );
}

#[test]
fn options_flow_into_for_headers() {
    let options = BuildOptions::default().with_for_condition_policy(ForConditionPolicy::PreferStacked);
    let mut ctx = BuildContext::new(options);
    ctx.begin_for().unwrap();
    match &ctx.tree().root().instructions()[0] {
        Instruction::For(vesl_ir::ForInstruction {
            header: vesl_ir::ForHeader::Recorded { policy, .. },
            ..
        }) => assert_eq!(*policy, ForConditionPolicy::PreferStacked),
        other => panic!("expected recorded for, got {other:?}"),
    }
}
