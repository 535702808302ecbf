//! VESL command line.

use veslc::commands::{emit, list, parse_emit_args};

fn main() {
    veslc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "emit" => {
            let parsed = match parse_emit_args(&args[2..]) {
                Ok(parsed) => parsed,
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!("Usage: veslc emit <demo> [--dialect=glsl|hlsl] [--indent=N] [-o FILE]");
                    std::process::exit(1);
                }
            };
            if let Err(err) = emit(&parsed) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        "list" => {
            println!("Demos:");
            list();
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("veslc {}", env!("CARGO_PKG_VERSION"));
        }
        other => {
            eprintln!("error: unknown command `{other}`");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("VESL shader generator");
    println!();
    println!("Usage: veslc <command> [options]");
    println!();
    println!("Commands:");
    println!("  emit <demo>          Build a demo shader and print its source");
    println!("  list                 List the demo shaders");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Emit options:");
    println!("  --dialect=<name>     Target dialect: glsl (default), hlsl");
    println!("  --indent=<width>     Spaces per indentation level (default: 4)");
    println!("  --no-preamble        Omit the dialect preamble");
    println!("  -o <path>            Write to a file instead of stdout");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=vesl_build=debug) to trace the build.");
}
