#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use vesl_build::{BuildContext, BuildOptions};
use vesl_ir::{Qualifier, TypeDesc};

use super::*;

fn keep_all() -> BuildContext {
    BuildContext::new(BuildOptions::default().with_dead_declaration_elision(false))
}

#[test]
fn auto_names_count_per_category() {
    let mut ctx = keep_all();
    let s0 = ctx.declare(TypeDesc::FLOAT, None).unwrap();
    let v0 = ctx.declare(TypeDesc::vec(3), None).unwrap();
    let s1 = ctx.declare(TypeDesc::INT, None).unwrap();
    let m0 = ctx.declare(TypeDesc::mat(4), None).unwrap();
    let shader = ctx.finish().unwrap();

    let mut names = NameTable::new(&shader);
    assert_eq!(names.name_of(s0).unwrap(), "x0");
    assert_eq!(names.name_of(v0).unwrap(), "v0");
    assert_eq!(names.name_of(s1).unwrap(), "x1");
    assert_eq!(names.name_of(m0).unwrap(), "m0");
}

#[test]
fn names_are_fixed_at_first_sight() {
    let mut ctx = keep_all();
    let a = ctx.declare(TypeDesc::FLOAT, None).unwrap();
    let b = ctx.declare(TypeDesc::FLOAT, None).unwrap();
    let shader = ctx.finish().unwrap();

    let mut names = NameTable::new(&shader);
    // Seen out of declaration order: b is named first.
    assert_eq!(names.name_of(b).unwrap(), "x0");
    assert_eq!(names.name_of(a).unwrap(), "x1");
    assert_eq!(names.name_of(b).unwrap(), "x0");
}

#[test]
fn auto_names_skip_explicit_names() {
    let mut ctx = keep_all();
    ctx.declare_global(Qualifier::Uniform, TypeDesc::FLOAT, "x0")
        .unwrap();
    let auto = ctx.declare(TypeDesc::FLOAT, None).unwrap();
    let shader = ctx.finish().unwrap();

    let mut names = NameTable::new(&shader);
    assert_eq!(names.name_of(auto).unwrap(), "x1");
}

#[test]
fn inlined_variables_bind_to_their_constructor() {
    let mut ctx = keep_all();
    let named = ctx
        .construct(TypeDesc::vec(2), vec![Expr::float(2.0)])
        .unwrap();
    let temp = ctx
        .construct(TypeDesc::vec(2), vec![Expr::float(1.0)])
        .unwrap();
    let consumed = ctx.consume(temp).unwrap();
    let used = ctx.var(named).unwrap();
    ctx.push_expression(Expr::builtin("dot", vec![consumed, used]))
        .unwrap();
    let shader = ctx.finish().unwrap();

    let mut names = NameTable::new(&shader);
    match names.binding(temp).unwrap() {
        Binding::Inline(ctor) => assert_eq!(ctor.var, temp),
        Binding::Named(name) => panic!("expected inline, got name {name}"),
    }
    assert_eq!(names.binding(named).unwrap(), Binding::Named("v0".into()));
}

#[test]
fn unregistered_variable_is_fatal() {
    let shader = BuildContext::default().finish().unwrap();
    let mut names = NameTable::new(&shader);
    let ghost = VarId::new(3);
    assert_eq!(
        names.binding(ghost),
        Err(RenderError::UnregisteredVariable(ghost))
    );
}
