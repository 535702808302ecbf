//! CLI errors.

use std::path::PathBuf;

use vesl_build::BuildError;
use vesl_codegen::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("unknown demo `{0}` (run `veslc list` to see the demos)")]
    UnknownDemo(String),

    #[error("unknown dialect `{0}` (expected glsl or hlsl)")]
    UnknownDialect(String),

    #[error("invalid indent width `{0}`")]
    InvalidIndent(String),

    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),

    #[error("missing demo name")]
    MissingDemo,

    #[error("failed to build shader: {0}")]
    Build(#[from] BuildError),

    #[error("failed to render shader: {0}")]
    Render(#[from] RenderError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
