//! Output formatting options.

/// How rendered text is laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
    /// Emit the dialect preamble (e.g. `#version 450`) before the shader.
    pub emit_preamble: bool,
    /// End the output with a newline.
    pub trailing_newline: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            emit_preamble: true,
            trailing_newline: true,
        }
    }
}

impl RenderOptions {
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn without_preamble(mut self) -> Self {
        self.emit_preamble = false;
        self
    }
}
