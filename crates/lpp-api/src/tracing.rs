//! Tracing and logging configuration for the scoring service
//!
//! Development gets pretty, human-readable output; production gets flattened
//! JSON events for log aggregation. `RUST_LOG` overrides the default filter in
//! both modes (e.g. `RUST_LOG=info,lpp_scoring=trace`).

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

/// Filter used when `RUST_LOG` is not set
///
/// Per-evaluation details from the engine are logged at DEBUG, so they only
/// show up in development unless explicitly enabled.
pub const fn default_directives(env: &Environment) -> &'static str {
    match env {
        Environment::Development => "debug,lpp_scoring=debug,tower_http=debug",
        Environment::Production => "info,lpp_scoring=info,tower_http=info",
    }
}

/// Initialize tracing/logging based on the environment
pub fn init_tracing(env: &Environment) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    let fmt_layer = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();

    tracing::info!(environment = ?env, "tracing initialized");
}
