//! Logging setup shared by the native entry points.
//!
//! With the `profiling` feature, `profiling::scope!` calls become tracing spans
//! and show up in the same subscriber at `trace` level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info,eframe=warn,wgpu=warn";

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let fmt_layer = fmt::layer().with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_ok()
    {
        #[cfg(feature = "profiling")]
        tracing::info!("Logging initialized (profiling scopes emitted as tracing spans)");
        #[cfg(not(feature = "profiling"))]
        tracing::info!("Logging initialized (profiling disabled in this build)");
    }
}
