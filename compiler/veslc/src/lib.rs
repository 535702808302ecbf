//! VESL command line driver.
//!
//! Builds the bundled demo shaders with [`vesl_build`] and renders them
//! with [`vesl_codegen`]. The binary in `main.rs` only parses arguments and
//! dispatches to [`commands`].

use std::sync::Once;

pub mod commands;
pub mod demos;
mod error;

pub use error::CliError;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Set `RUST_LOG` to enable, e.g. `RUST_LOG=vesl_build=debug`. Without it
/// nothing is installed and the instrumentation costs a level check.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
