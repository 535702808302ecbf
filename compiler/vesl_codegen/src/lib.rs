//! VESL Codegen - GLSL and HLSL text from a built shader.
//!
//! Rendering walks the IR tree once, asking the [`Dialect`] how to spell
//! each construct and the name table what each variable reference becomes.
//! It only reads the tree and the registry, so the same [`Shader`] can be
//! rendered any number of times, in any dialect, with identical names.
//!
//! # Example
//!
//! ```
//! use vesl_build::BuildContext;
//! use vesl_codegen::{render, Glsl, RenderOptions};
//! use vesl_ir::{Expr, TypeDesc};
//!
//! let mut ctx = BuildContext::default();
//! ctx.begin_func_with("main", TypeDesc::VOID, vec![])?;
//! ctx.construct_named(TypeDesc::FLOAT, "speed", vec![Expr::float(2.0)])?;
//! ctx.end_func()?;
//! let shader = ctx.finish()?;
//!
//! let text = render(&shader, &Glsl, &RenderOptions::default().without_preamble())?;
//! assert_eq!(text, "void main() {\n    float speed = float(2.0);\n}\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod dialect;
mod error;
mod expr;
mod for_header;
mod generator;
mod names;
mod options;
mod stmt;

pub use dialect::{format_float, Dialect, Glsl, Hlsl, InterfaceStyle};
pub use error::RenderError;
pub use options::RenderOptions;

use vesl_build::Shader;
use vesl_ir::BlockId;

use generator::Generator;

/// Render a whole shader.
pub fn render(
    shader: &Shader,
    dialect: &dyn Dialect,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    tracing::debug!(dialect = dialect.name(), "render shader");
    let mut generator = Generator::new(shader, dialect, options);
    if options.emit_preamble {
        if let Some(preamble) = dialect.preamble() {
            generator.out.writeln(preamble);
            generator.out.blank_line();
        }
    }
    generator.block(BlockId::ROOT)?;
    Ok(generator.finish(options.trailing_newline))
}

/// Render the contents of one block, without the preamble.
///
/// Names are assigned as if the block were the whole shader, so they can
/// differ from the names the same variables get in [`render`].
pub fn render_block(
    shader: &Shader,
    dialect: &dyn Dialect,
    options: &RenderOptions,
    block: BlockId,
) -> Result<String, RenderError> {
    tracing::debug!(dialect = dialect.name(), ?block, "render block");
    let mut generator = Generator::new(shader, dialect, options);
    generator.block(block)?;
    Ok(generator.finish(options.trailing_newline))
}
