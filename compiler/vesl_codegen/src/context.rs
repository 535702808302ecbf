//! Output buffer with indentation tracking.

use crate::RenderOptions;

/// Line-oriented output buffer.
pub(crate) struct RenderContext {
    indent: usize,
    indent_width: usize,
    output: String,
}

impl RenderContext {
    pub(crate) fn new(options: &RenderOptions) -> Self {
        Self {
            indent: 0,
            indent_width: options.indent_width,
            output: String::with_capacity(4096),
        }
    }

    pub(crate) fn indent(&mut self) {
        self.indent += 1;
    }

    pub(crate) fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent * self.indent_width {
            self.output.push(' ');
        }
    }

    /// Write one indented line.
    pub(crate) fn writeln(&mut self, line: &str) {
        self.write_indent();
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Write an empty line. Consecutive blank lines collapse into one.
    pub(crate) fn blank_line(&mut self) {
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            self.output.push('\n');
        }
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
