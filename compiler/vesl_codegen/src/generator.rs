//! Generator state shared by the expression and statement writers.

use vesl_build::Shader;

use crate::context::RenderContext;
use crate::names::NameTable;
use crate::{Dialect, RenderOptions};

/// One render of one shader.
///
/// The name table is created fresh per render, so names depend only on the
/// shader and on the order things are written.
pub(crate) struct Generator<'a> {
    pub(crate) shader: &'a Shader,
    pub(crate) dialect: &'a dyn Dialect,
    pub(crate) names: NameTable<'a>,
    pub(crate) out: RenderContext,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(shader: &'a Shader, dialect: &'a dyn Dialect, options: &RenderOptions) -> Self {
        Self {
            shader,
            dialect,
            names: NameTable::new(shader),
            out: RenderContext::new(options),
        }
    }

    /// Take the text written so far, normalizing the final newline.
    pub(crate) fn finish(mut self, trailing_newline: bool) -> String {
        let output = self.out.take_output();
        let mut text = output.trim_end_matches('\n').to_owned();
        if trailing_newline && !text.is_empty() {
            text.push('\n');
        }
        text
    }
}
