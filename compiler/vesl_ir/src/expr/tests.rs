use pretty_assertions::assert_eq;

use super::*;

fn forward(var: u32, arg: Expr) -> Constructor {
    Constructor {
        var: VarId::new(var),
        ty: TypeDesc::FLOAT,
        status: CtorStatus::Forward,
        flags: CtorFlags::empty(),
        qualifier: None,
        args: vec![arg],
    }
}

#[test]
fn single_arg_forward_passes_through() {
    let ctor = forward(0, Expr::int(1));
    assert_eq!(ctor.pass_through(), Some(&Expr::int(1)));
}

#[test]
fn initialisation_does_not_pass_through() {
    let mut ctor = forward(0, Expr::int(1));
    ctor.status = CtorStatus::Initialisation;
    assert_eq!(ctor.pass_through(), None);

    let mut two = forward(0, Expr::int(1));
    two.args.push(Expr::int(2));
    assert_eq!(two.pass_through(), None);
}

#[test]
fn call_flags_combine_type_and_parens() {
    assert!(CtorFlags::CALL.contains(CtorFlags::DISPLAY_TYPE));
    assert!(CtorFlags::CALL.contains(CtorFlags::PARENTHESIS));
    assert!(!CtorFlags::CALL.contains(CtorFlags::MULTIPLE_INITS));
}

#[test]
fn swizzle_accepts_color_letters() {
    let expr = Expr::swizzle(Expr::Reference(VarId::new(0)), "rgb");
    let Expr::Swizzle { components, .. } = expr else {
        panic!("expected swizzle");
    };
    assert_eq!(
        components.as_slice(),
        &[Component::X, Component::Y, Component::Z]
    );
}

#[test]
fn negative_literals_rank_as_prefix() {
    assert_eq!(Expr::int(-1).intrinsic_rank(), Some(Rank::PREFIX));
    assert_eq!(Expr::float(-0.5).intrinsic_rank(), Some(Rank::PREFIX));
    assert_eq!(Expr::int(1).intrinsic_rank(), Some(Rank::PRIMARY));
    assert_eq!(Expr::uint(3).intrinsic_rank(), Some(Rank::PRIMARY));
}

#[test]
fn operators_have_no_intrinsic_rank() {
    let sum = Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2));
    assert_eq!(sum.intrinsic_rank(), None);
    assert_eq!(Expr::Reference(VarId::new(0)).intrinsic_rank(), None);
}

