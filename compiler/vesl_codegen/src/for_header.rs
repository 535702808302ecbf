//! For-loop headers.
//!
//! A recorded header is a flat list of statements. It is split into the
//! three clauses by a small state machine over the statements in order:
//!
//! ```text
//! INIT ──bool forward──▶ CONDITION ──non-bool──▶ LOOP
//!   └───────────────non-bool forward────────────────▲
//! ```
//!
//! In INIT, declared constructors are init clauses; in CONDITION, a later
//! boolean constructor replaces the condition; everything from LOOP on is
//! an increment. A plain statement is an init only while the init clause
//! is still empty and no condition was stacked; otherwise it moves the
//! header to LOOP.

use vesl_ir::{
    Constructor, CtorFlags, CtorStatus, Expr, ForConditionPolicy, ForHeader, ForInstruction,
    Instruction,
};

use crate::generator::Generator;
use crate::RenderError;

/// One clause of a header, before rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum HeaderItem<'a> {
    Ctor(&'a Constructor),
    Expr(&'a Expr),
}

impl<'a> HeaderItem<'a> {
    fn of(expr: &'a Expr) -> Self {
        match expr {
            Expr::Constructor(ctor) => HeaderItem::Ctor(ctor),
            expr => HeaderItem::Expr(expr),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ForParts<'a> {
    pub(crate) inits: Vec<HeaderItem<'a>>,
    pub(crate) condition: Option<HeaderItem<'a>>,
    pub(crate) increments: Vec<HeaderItem<'a>>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Phase {
    Init,
    Condition,
    Loop,
}

/// Split recorded header statements into clauses.
///
/// `stacked` is the condition supplied out of band; when the statements
/// also capture one, `policy` decides which is used.
pub(crate) fn partition<'a>(
    instructions: &'a [Instruction],
    stacked: Option<&'a Expr>,
    policy: ForConditionPolicy,
) -> Result<ForParts<'a>, RenderError> {
    let mut phase = Phase::Init;
    let mut parts = ForParts::default();
    let mut captured = None;

    for instr in instructions {
        let Instruction::Statement(expr) = instr else {
            return Err(RenderError::Misplaced {
                kind: instr.kind_name(),
                context: "a for header",
            });
        };
        let Expr::Constructor(ctor) = expr else {
            if phase == Phase::Init && parts.inits.is_empty() && stacked.is_none() {
                parts.inits.push(HeaderItem::Expr(expr));
            } else {
                phase = Phase::Loop;
                parts.increments.push(HeaderItem::Expr(expr));
            }
            continue;
        };
        let item = HeaderItem::Ctor(ctor);
        match phase {
            Phase::Init if ctor.status != CtorStatus::Forward => parts.inits.push(item),
            Phase::Init | Phase::Condition if ctor.ty.is_bool() => {
                phase = Phase::Condition;
                captured = Some(item);
            }
            Phase::Init | Phase::Condition | Phase::Loop => {
                phase = Phase::Loop;
                parts.increments.push(item);
            }
        }
    }

    parts.condition = match (captured, stacked) {
        (Some(captured), Some(stacked)) => Some(match policy {
            ForConditionPolicy::PreferCaptured => captured,
            ForConditionPolicy::PreferStacked => HeaderItem::Expr(stacked),
        }),
        (captured, stacked) => captured.or(stacked.map(HeaderItem::Expr)),
    };
    tracing::trace!(
        inits = parts.inits.len(),
        condition = parts.condition.is_some(),
        increments = parts.increments.len(),
        "for header partitioned"
    );
    Ok(parts)
}

fn pad(clause: &str) -> String {
    if clause.is_empty() {
        String::new()
    } else {
        format!(" {clause}")
    }
}

impl<'a> Generator<'a> {
    pub(crate) fn for_loop(&mut self, instr: &'a ForInstruction) -> Result<(), RenderError> {
        let shader = self.shader;
        let parts = match &instr.header {
            ForHeader::Recorded {
                args,
                stacked_condition,
                policy,
            } => {
                let block = shader
                    .tree()
                    .get(*args)
                    .ok_or(RenderError::UnknownBlock(*args))?;
                partition(block.instructions(), stacked_condition.as_ref(), *policy)?
            }
            ForHeader::Clauses(clauses) => ForParts {
                inits: clauses.inits.iter().map(HeaderItem::of).collect(),
                condition: clauses.condition.as_ref().map(HeaderItem::of),
                increments: clauses.increments.iter().map(HeaderItem::of).collect(),
            },
        };
        let header = self.for_header(&parts)?;
        self.out.writeln(&format!("for ({header}) {{"));
        self.nested(instr.body)?;
        self.out.writeln("}");
        Ok(())
    }

    /// `inits; condition; increments`, with empty clauses left bare.
    pub(crate) fn for_header(&mut self, parts: &ForParts<'a>) -> Result<String, RenderError> {
        let mut inits = Vec::with_capacity(parts.inits.len());
        for (i, item) in parts.inits.iter().enumerate() {
            inits.push(self.header_init(*item, i > 0)?);
        }
        let condition = match parts.condition {
            Some(item) => self.header_value(item)?,
            None => String::new(),
        };
        let increments = parts
            .increments
            .iter()
            .map(|item| self.header_value(*item))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!(
            "{};{};{}",
            inits.join(", "),
            pad(&condition),
            pad(&increments.join(", "))
        ))
    }

    /// An init clause. After the first one the type can no longer be
    /// repeated, so only the name is written.
    fn header_init(&mut self, item: HeaderItem<'a>, follows: bool) -> Result<String, RenderError> {
        let HeaderItem::Ctor(ctor) = item else {
            return self.header_value(item);
        };
        if !matches!(
            ctor.status,
            CtorStatus::Declaration | CtorStatus::Initialisation
        ) {
            return self.header_value(item);
        }
        let target = if follows || ctor.flags.contains(CtorFlags::MULTIPLE_INITS) {
            self.names.name_of(ctor.var)?
        } else {
            self.declaration(ctor)?
        };
        if ctor.has_value() {
            Ok(format!("{target} = {}", self.ctor_value(ctor)?))
        } else {
            Ok(target)
        }
    }

    fn header_value(&mut self, item: HeaderItem<'a>) -> Result<String, RenderError> {
        match item {
            HeaderItem::Ctor(ctor) => self.ctor_value(ctor),
            HeaderItem::Expr(expr) => self.expr(expr),
        }
    }
}
