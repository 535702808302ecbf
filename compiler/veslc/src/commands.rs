//! Command handlers for the `veslc` binary.

mod emit;
mod list;

pub use emit::{emit, parse_emit_args, render_demo, DialectChoice, EmitArgs};
pub use list::list;
