//! Logging setup utilities for Hiroba.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Module path of the server library crate
const LIBRARY_TARGET: &str = "hiroba_server";

/// Initialize the tracing subscriber with the specified default log level.
///
/// The filter covers the server library crate and the binary. The level can be
/// overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "hiroba-server")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use hiroba_shared::logger::setup_logger;
///
/// setup_logger("hiroba-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the fallback filter directive used when `RUST_LOG` is not set.
///
/// Crate and binary names are normalized to their module-path form
/// (`hiroba-server` → `hiroba_server`) so the directive actually matches.
/// A binary named after the library crate gets a single directive.
fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    let binary_target = binary_name.replace('-', "_");
    let mut targets = vec![LIBRARY_TARGET];
    if binary_target != LIBRARY_TARGET {
        targets.push(binary_target.as_str());
    }
    targets.push("tower_http");

    targets
        .iter()
        .map(|target| format!("{target}={default_log_level}"))
        .collect::<Vec<_>>()
        .join(",")
}
