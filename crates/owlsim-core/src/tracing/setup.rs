//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the owlsim tracing/logging system.
///
/// Reads `OWLSIM_LOG` for per-subsystem log levels, e.g.
/// `OWLSIM_LOG=owlsim_sim=debug,owlsim_taxon=info`.
/// Falls back to `owlsim=info` if unset or invalid. Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("OWLSIM_LOG")
            .unwrap_or_else(|_| EnvFilter::new("owlsim=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .init();
    });
}
