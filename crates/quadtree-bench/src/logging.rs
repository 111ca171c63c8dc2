/*!
Logging and profiling setup for the benchmark driver.

Two implementations share one entry point, `setup_logging_and_profiling()`:

- real: compiled with `feature = "profiling"`. Adds a tracing-chrome layer when
  `--trace-file` is given, so the `profiling::scope!` spans of the index and the
  driver end up in a Chrome trace.
- stub: every other build. Plain fmt logging.

Both honour `RUST_LOG` and fall back to `info` when it is unset.
*/

use crate::settings::Settings;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(feature = "profiling")]
mod inner {
    use super::env_filter;
    use crate::settings::Settings;
    use tracing_chrome::{ChromeLayerBuilder, FlushGuard};
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    /// Keeps the trace file open; dropping it flushes the trace
    pub struct LoggingGuard {
        _chrome: Option<FlushGuard>,
    }

    pub fn setup_logging_and_profiling(settings: &Settings) -> LoggingGuard {
        let fmt_layer = fmt::layer().with_filter(env_filter());

        let (chrome_layer, guard) = match &settings.trace_file {
            Some(path) => {
                let (layer, guard) = ChromeLayerBuilder::new()
                    .file(path)
                    .include_args(true)
                    .build();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        tracing_subscriber::registry()
            .with(chrome_layer)
            .with(fmt_layer)
            .init();

        match &settings.trace_file {
            Some(path) => tracing::info!("Profiling enabled, writing trace to {}", path.display()),
            None => tracing::info!("Logging initialized (pass --trace-file to record a trace)"),
        }

        LoggingGuard { _chrome: guard }
    }
}

#[cfg(not(feature = "profiling"))]
mod inner {
    use super::env_filter;
    use crate::settings::Settings;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    /// Nothing to flush in this build
    pub struct LoggingGuard;

    pub fn setup_logging_and_profiling(_settings: &Settings) -> LoggingGuard {
        tracing_subscriber::registry()
            .with(fmt::layer().with_filter(env_filter()))
            .init();

        tracing::debug!("Logging initialized (profiling disabled in this build)");
        LoggingGuard
    }
}

pub use inner::{LoggingGuard, setup_logging_and_profiling};

/// Log the effective experiment parameters
pub fn log_settings(settings: &Settings) {
    tracing::info!(
        "{} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("  Points: {}", settings.points);
    tracing::info!(
        "  Domain: [{}, {}]²",
        settings.min_coord,
        settings.max_coord
    );
    tracing::info!(
        "  Queries: {} × {}-wide windows ({})",
        settings.queries,
        settings.query_size,
        if settings.parallel {
            "parallel batch"
        } else {
            "sequential"
        }
    );
    tracing::info!("  Node capacity: {}", settings.capacity);
}
