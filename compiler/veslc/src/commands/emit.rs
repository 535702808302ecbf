//! `veslc emit <demo> [--dialect=glsl|hlsl] [--indent=N] [-o FILE]`

use std::path::PathBuf;

use vesl_codegen::{render, Dialect, Glsl, Hlsl, RenderOptions};

use crate::{demos, CliError};

/// Target dialect selected on the command line.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum DialectChoice {
    #[default]
    Glsl,
    Hlsl,
}

impl DialectChoice {
    pub fn parse(name: &str) -> Result<Self, CliError> {
        match name {
            "glsl" => Ok(Self::Glsl),
            "hlsl" => Ok(Self::Hlsl),
            other => Err(CliError::UnknownDialect(other.to_owned())),
        }
    }

    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::Glsl => &Glsl,
            Self::Hlsl => &Hlsl,
        }
    }
}

/// Parsed arguments of `emit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitArgs {
    pub demo: String,
    pub dialect: DialectChoice,
    pub render: RenderOptions,
    pub output: Option<PathBuf>,
}

/// Parse the arguments following `emit`.
pub fn parse_emit_args(args: &[String]) -> Result<EmitArgs, CliError> {
    let mut demo = None;
    let mut dialect = DialectChoice::default();
    let mut render = RenderOptions::default();
    let mut output = None;

    let mut i = 0;
    while i < args.len() {
        let arg = &args[i];
        if arg == "-o" && i + 1 < args.len() {
            output = Some(PathBuf::from(&args[i + 1]));
            i += 2;
            continue;
        }
        if let Some(name) = arg.strip_prefix("--dialect=") {
            dialect = DialectChoice::parse(name)?;
        } else if let Some(width) = arg.strip_prefix("--indent=") {
            let width = width
                .parse()
                .map_err(|_| CliError::InvalidIndent(width.to_owned()))?;
            render = render.with_indent_width(width);
        } else if arg == "--no-preamble" {
            render = render.without_preamble();
        } else if !arg.starts_with('-') && demo.is_none() {
            demo = Some(arg.clone());
        } else {
            return Err(CliError::UnexpectedArgument(arg.clone()));
        }
        i += 1;
    }

    Ok(EmitArgs {
        demo: demo.ok_or(CliError::MissingDemo)?,
        dialect,
        render,
        output,
    })
}

/// Build a demo and render it.
pub fn render_demo(
    name: &str,
    dialect: DialectChoice,
    options: &RenderOptions,
) -> Result<String, CliError> {
    let demo = demos::find(name).ok_or_else(|| CliError::UnknownDemo(name.to_owned()))?;
    let shader = demo.build()?;
    Ok(render(&shader, dialect.dialect(), options)?)
}

/// Run `emit`: render to the output file, or to stdout.
pub fn emit(args: &EmitArgs) -> Result<(), CliError> {
    let text = render_demo(&args.demo, args.dialect, &args.render)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &text).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), bytes = text.len(), "shader written");
        }
        None => print!("{text}"),
    }
    Ok(())
}
