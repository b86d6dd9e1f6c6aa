//! Structured logging setup.
//!
//! The library itself only emits `tracing` events:
//! - `debug` when a search or setting is built or finishes
//! - `trace` per rejected parameter point and per contraction
//! - `warn` when a search finds no feasible point
//!
//! Embedding applications call [`init_logging`] once to install a
//! subscriber writing either human text or JSON lines to stderr.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Filter on `snc_core=<level>`.
///
/// `config.level` already folds in `SNC_LOG` and `RUST_LOG`, so an explicit
/// override is never shadowed by the environment.
fn build_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::new(format!("snc_core={}", config.level))
}

/// Install the global subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> Result<(), TryInitError> {
    let filter = build_filter(config);
    match config.format {
        LogFormat::Human => {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(std::io::stderr().is_terminal());
            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer)
                    .try_init()
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(layer.without_time())
                    .try_init()
            }
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
}

/// Initialize from the environment with no overrides.
pub fn init_default_logging() -> Result<(), TryInitError> {
    init_logging(&LogConfig::from_env(None, None))
}
