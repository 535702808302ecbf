//! Demo shaders, built through the public builder API.
//!
//! Each demo is a plain function from nothing to a [`Shader`], so the same
//! demo can be rendered in every dialect.

use vesl_build::{BuildContext, BuildError, CaseBody, CtorSpec, Shader};
use vesl_ir::{
    BinaryOp, CtorStatus, Expr, Field, Literal, Qualifier, SamplerDim, TypeDesc, UnaryOp, VarId,
};

/// A named demo shader.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Result<Shader, BuildError>,
}

impl Demo {
    pub fn build(&self) -> Result<Shader, BuildError> {
        tracing::debug!(demo = self.name, "building demo");
        (self.build)()
    }
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "gradient",
        description: "two-tone gradient with a pulsing right half",
        build: gradient,
    },
    Demo {
        name: "blur",
        description: "horizontal five-tap blur through a helper function",
        build: blur,
    },
    Demo {
        name: "palette",
        description: "material lookup through a switch, struct and uniform block",
        build: palette,
    },
    Demo {
        name: "threshold",
        description: "while and do-while loops with an early discard",
        build: threshold,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}

fn floats(values: &[f64]) -> Vec<Expr> {
    values.iter().copied().map(Expr::float).collect()
}

/// `T name = value;` with the value written as is.
fn let_named(
    ctx: &mut BuildContext,
    ty: TypeDesc,
    name: &str,
    value: Expr,
) -> Result<VarId, BuildError> {
    ctx.emit(
        CtorSpec::new(ty, CtorStatus::Initialisation)
            .with_name(name)
            .with_args(vec![value]),
    )
}

fn assign(ctx: &mut BuildContext, target: VarId, value: Expr) -> Result<(), BuildError> {
    let target = ctx.var(target)?;
    ctx.push_expression(Expr::assign(target, value))
}

fn gradient() -> Result<Shader, BuildError> {
    let mut ctx = BuildContext::default();
    let uv = ctx.declare_global(Qualifier::In, TypeDesc::vec(2), "uv")?;
    let time = ctx.declare_global(Qualifier::Uniform, TypeDesc::FLOAT, "time")?;
    let color = ctx.declare_global(Qualifier::Out, TypeDesc::vec(4), "color")?;

    ctx.function("main", TypeDesc::VOID, &[], |ctx, _| {
        let low = ctx.inline_ctor(TypeDesc::vec(3), floats(&[0.1, 0.2, 0.5]))?;
        let high = ctx.inline_ctor(TypeDesc::vec(3), floats(&[1.0, 0.6, 0.2]))?;
        let height = Expr::swizzle(ctx.var(uv)?, "y");
        let base = let_named(
            ctx,
            TypeDesc::vec(3),
            "base",
            Expr::builtin("mix", vec![low, high, height]),
        )?;

        let left = Expr::binary(
            BinaryOp::Lt,
            Expr::swizzle(ctx.var(uv)?, "x"),
            Expr::float(0.5),
        );
        ctx.if_else(
            left,
            |ctx| {
                let rgb = ctx.var(base)?;
                let value = ctx.inline_ctor(TypeDesc::vec(4), vec![rgb, Expr::float(1.0)])?;
                assign(ctx, color, value)
            },
            |ctx| {
                let rgb = ctx.var(base)?;
                let wave = Expr::builtin("sin", vec![ctx.var(time)?]);
                let pulse = ctx.forward(TypeDesc::FLOAT, Expr::builtin("abs", vec![wave]))?;
                let scaled = Expr::binary(BinaryOp::Mul, rgb, ctx.consume(pulse)?);
                let value = ctx.inline_ctor(TypeDesc::vec(4), vec![scaled, Expr::float(1.0)])?;
                assign(ctx, color, value)
            },
        )
    })?;
    ctx.finish()
}

fn blur() -> Result<Shader, BuildError> {
    let mut ctx = BuildContext::default();
    let image = ctx.declare_global(
        Qualifier::Uniform,
        TypeDesc::Sampler(SamplerDim::D2),
        "image",
    )?;
    let uv = ctx.declare_global(Qualifier::In, TypeDesc::vec(2), "uv")?;
    let color = ctx.declare_global(Qualifier::Out, TypeDesc::vec(4), "color")?;

    let sample_row = ctx.function(
        "sample_row",
        TypeDesc::vec(4),
        &[
            (TypeDesc::vec(2), "center", None),
            (TypeDesc::FLOAT, "spacing", None),
        ],
        |ctx, params| {
            let (center, spacing) = (params[0], params[1]);
            let sum = ctx.construct_named(TypeDesc::vec(4), "sum", vec![Expr::float(0.0)])?;

            ctx.begin_for()?;
            ctx.begin_for_args()?;
            let i = let_named(ctx, TypeDesc::INT, "i", Expr::int(-2))?;
            let bound = ctx.var(i)?;
            ctx.forward(
                TypeDesc::BOOL,
                Expr::binary(BinaryOp::LtEq, bound, Expr::int(2)),
            )?;
            let counter = ctx.var(i)?;
            ctx.forward(TypeDesc::INT, Expr::postfix(UnaryOp::Increment, counter))?;
            ctx.begin_for_body()?;
            let tap = ctx.var(i)?;
            let index = ctx.inline_ctor(TypeDesc::FLOAT, vec![tap])?;
            let shift = Expr::binary(BinaryOp::Mul, index, ctx.var(spacing)?);
            let offset = ctx.inline_ctor(TypeDesc::vec(2), vec![shift, Expr::float(0.0)])?;
            let coord = Expr::binary(BinaryOp::Add, ctx.var(center)?, offset);
            let texel = Expr::builtin("texture", vec![ctx.var(image)?, coord]);
            let target = ctx.var(sum)?;
            ctx.push_expression(Expr::binary(BinaryOp::AddAssign, target, texel))?;
            ctx.end_for()?;

            let total = ctx.var(sum)?;
            ctx.return_value(
                Expr::binary(BinaryOp::Div, total, Expr::float(5.0)),
                TypeDesc::vec(4),
            )
        },
    )?;

    ctx.function("main", TypeDesc::VOID, &[], |ctx, _| {
        let call = Expr::call(sample_row, vec![ctx.var(uv)?, Expr::float(0.01)]);
        assign(ctx, color, call)
    })?;
    ctx.finish()
}

fn set_albedo(ctx: &mut BuildContext, material: VarId, rgb: [f64; 3]) -> Result<(), BuildError> {
    let target = Expr::member(ctx.var(material)?, "albedo");
    let value = ctx.inline_ctor(TypeDesc::vec(3), floats(&rgb))?;
    ctx.push_expression(Expr::assign(target, value))
}

fn palette() -> Result<Shader, BuildError> {
    let mut ctx = BuildContext::default();
    let modes = ctx.declare_const(TypeDesc::INT, "MODES", Expr::int(3))?;
    let material = ctx.declare_struct(
        "Material",
        vec![
            Field::new(TypeDesc::vec(3), "albedo"),
            Field::new(TypeDesc::FLOAT, "roughness"),
        ],
    )?;
    let settings = ctx.declare_interface(
        Qualifier::Uniform,
        "Settings",
        vec![
            Field::new(TypeDesc::INT, "mode"),
            Field::new(TypeDesc::FLOAT, "exposure"),
        ],
        "settings",
    )?;
    let color = ctx.declare_global(Qualifier::Out, TypeDesc::vec(4), "color")?;

    let pick = ctx.function(
        "pick",
        material.clone(),
        &[(TypeDesc::INT, "mode", None)],
        |ctx, params| {
            let result = ctx.declare(material.clone(), Some("result"))?;
            let selector = ctx.var(params[0])?;
            ctx.switch_on(
                selector,
                vec![
                    (
                        Some(Literal::Int(0)),
                        Box::new(move |ctx: &mut BuildContext| {
                            set_albedo(ctx, result, [1.0, 0.2, 0.2])?;
                            ctx.break_loop()
                        }) as CaseBody<'_>,
                    ),
                    (
                        Some(Literal::Int(1)),
                        Box::new(move |ctx: &mut BuildContext| {
                            set_albedo(ctx, result, [0.2, 1.0, 0.2])?;
                            ctx.break_loop()
                        }) as CaseBody<'_>,
                    ),
                    (
                        None,
                        Box::new(move |ctx: &mut BuildContext| {
                            set_albedo(ctx, result, [1.0, 1.0, 1.0])
                        }) as CaseBody<'_>,
                    ),
                ],
            )?;
            let roughness = Expr::member(ctx.var(result)?, "roughness");
            ctx.push_expression(Expr::assign(roughness, Expr::float(0.5)))?;
            let value = ctx.var(result)?;
            ctx.return_value(value, material.clone())
        },
    )?;

    ctx.function("main", TypeDesc::VOID, &[], |ctx, _| {
        let mode = Expr::member(ctx.var(settings)?, "mode");
        let wrapped = Expr::binary(BinaryOp::Mod, mode, ctx.var(modes)?);
        let chosen = let_named(
            ctx,
            material.clone(),
            "chosen",
            Expr::call(pick, vec![wrapped]),
        )?;
        let albedo = Expr::member(ctx.var(chosen)?, "albedo");
        let exposure = Expr::member(ctx.var(settings)?, "exposure");
        let lit = ctx.inline_ctor(
            TypeDesc::vec(4),
            vec![
                Expr::binary(BinaryOp::Mul, albedo, exposure),
                Expr::float(1.0),
            ],
        )?;
        assign(ctx, color, lit)
    })?;
    ctx.finish()
}

fn threshold() -> Result<Shader, BuildError> {
    let mut ctx = BuildContext::default();
    let cutoff = ctx.declare_global(Qualifier::Uniform, TypeDesc::FLOAT, "cutoff")?;
    let intensity = ctx.declare_global(Qualifier::In, TypeDesc::FLOAT, "intensity")?;

    ctx.function("main", TypeDesc::VOID, &[], |ctx, _| {
        let start = ctx.var(intensity)?;
        let level = let_named(ctx, TypeDesc::FLOAT, "level", start)?;

        let above = Expr::binary(BinaryOp::Gt, ctx.var(level)?, Expr::float(1.0));
        ctx.while_loop(above, |ctx| {
            let target = ctx.var(level)?;
            ctx.push_expression(Expr::binary(
                BinaryOp::SubAssign,
                target,
                Expr::float(1.0),
            ))
        })?;

        ctx.begin_do_while()?;
        let target = ctx.var(level)?;
        ctx.push_expression(Expr::binary(
            BinaryOp::MulAssign,
            target,
            Expr::float(2.0),
        ))?;
        let below = Expr::binary(BinaryOp::Lt, ctx.var(level)?, ctx.var(cutoff)?);
        ctx.end_do_while(below)?;

        let over = Expr::binary(BinaryOp::Gt, ctx.var(level)?, ctx.var(cutoff)?);
        ctx.if_then(over, BuildContext::discard)
    })?;
    ctx.finish()
}
