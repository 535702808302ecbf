//! VESL Build - cursor-driven construction of shader IR.
//!
//! Front ends describe a shader as a flat sequence of calls on a
//! [`BuildContext`]: values are constructed, scopes are opened and closed,
//! statements are appended at the cursor. The context assembles the
//! [`vesl_ir::IrTree`] and tracks every variable in a [`VarRegistry`] so
//! the code generator can decide which values get a name and which are
//! inlined.
//!
//! # Example
//!
//! ```
//! use vesl_build::BuildContext;
//! use vesl_ir::{BinaryOp, Expr, TypeDesc};
//!
//! let mut ctx = BuildContext::default();
//! ctx.begin_func_with("main", TypeDesc::VOID, vec![])?;
//! let speed = ctx.construct_named(TypeDesc::FLOAT, "speed", vec![Expr::float(2.0)])?;
//! let doubled = ctx.var(speed)?;
//! ctx.begin_if(Expr::binary(BinaryOp::Gt, doubled, Expr::float(1.0)))?;
//! ctx.discard()?;
//! ctx.end_if()?;
//! ctx.end_func()?;
//! let shader = ctx.finish()?;
//! assert_eq!(shader.registry().len(), 2);
//! # Ok::<(), vesl_build::BuildError>(())
//! ```
//!
//! # Modules
//!
//! - `context`: the cursor, the push chokepoint, value constructors
//! - `control_flow`: if chains, loops, switches, keyword statements
//! - `functions`: functions, overloads, parameters, `return`
//! - `declarations`: structs, interface blocks, globals, constants
//! - `scoped`: closure helpers over `begin_*` / `end_*`
//! - `registry`: variable records and lifecycle status

mod context;
mod control_flow;
mod declarations;
mod error;
mod functions;
mod options;
mod registry;
mod scoped;
mod shader;

pub use context::{BuildContext, CtorSpec};
pub use error::BuildError;
pub use options::BuildOptions;
pub use registry::{VarRecord, VarRegistry};
pub use scoped::CaseBody;
pub use shader::Shader;
