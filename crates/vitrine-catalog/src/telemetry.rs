//! # Tracing Setup
//!
//! Installs the global `tracing` subscriber for binaries and tests that
//! embed the catalog.
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages from every crate
//! - `RUST_LOG=vitrine=trace` - Trace the vitrine crates only
//! - Default: `info,vitrine=debug`

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info,vitrine=debug";

/// Installs a formatting subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already installed, so
/// calling it from several tests is harmless.
pub fn init_tracing() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
