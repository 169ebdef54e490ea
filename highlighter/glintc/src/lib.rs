//! Library crate behind the `glint` binary.
//!
//! The core (matching, tokenizing, dispatch) lives in the `glint_*` crates;
//! this crate adds the outer surfaces: HTML rendering, directory traversal,
//! the per-worker render pipeline, and the subcommand implementations.

pub mod commands;
pub mod html;
pub mod render;
pub mod walk;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for CLI output.
///
/// Call once at startup; safe to call multiple times. `RUST_LOG` overrides
/// the default `info` filter (e.g. `RUST_LOG=glint_pool=debug`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_level(true))
            .with(filter)
            .init();
    });
}
