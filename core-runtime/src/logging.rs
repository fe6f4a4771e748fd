//! # Logging & Tracing Infrastructure
//!
//! Configures the `tracing-subscriber` stack for the whole process:
//! a reloadable [`EnvFilter`] plus one fmt layer in the configured
//! output format.
//!
//! ## Reloadable filter
//!
//! The filter sits behind a `reload` handle so interactive flows can
//! temporarily silence diagnostics. During audio playback the menu calls
//! [`quiet`] (decoder and device chatter would otherwise interleave with
//! the operator prompt); when playback finishes naturally the coordinator
//! calls [`restore`] to put the configured filter back.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default().with_format(LogFormat::Compact);
//! init_logging(config)?;
//! tracing::info!("client started");
//! ```
//!
//! `RUST_LOG` overrides the configured level when set.

use std::sync::OnceLock;

use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, registry::Registry, reload,
    util::SubscriberInitExt,
};

use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Compact format for production
    Compact,
    /// Structured JSON format for machine parsing
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Compact;
    }
}

/// Minimum level of events that pass the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Minimum log level (overridden by `RUST_LOG` when set)
    pub level: LogLevel,
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

struct LoggingState {
    handle: reload::Handle<EnvFilter, Registry>,
    directives: String,
}

static STATE: OnceLock<LoggingState> = OnceLock::new();

/// Install the global tracing subscriber.
///
/// Must be called at most once per process; a second call (or a call
/// after some other subscriber was installed) returns a config error.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV)
        .unwrap_or_else(|_| config.level.as_directive().to_string());
    let filter = EnvFilter::try_new(&directives)
        .map_err(|e| Error::Config(format!("Invalid log filter '{}': {}", directives, e)))?;

    let (filter_layer, handle) = reload::Layer::new(filter);
    let registry = tracing_subscriber::registry().with(filter_layer);

    let init_result = match config.format {
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    init_result.map_err(|e| Error::Config(format!("Failed to install subscriber: {}", e)))?;

    STATE
        .set(LoggingState { handle, directives })
        .map_err(|_| Error::Internal("Logging state already set".to_string()))?;

    Ok(())
}

/// Temporarily restrict logging to errors only.
///
/// No-op when logging was never initialized.
pub fn quiet() {
    if let Some(state) = STATE.get() {
        if let Err(e) = state.handle.reload(EnvFilter::new("error")) {
            eprintln!("Failed to quiet log filter: {}", e);
        }
    }
}

/// Restore the filter configured at [`init_logging`] time.
///
/// No-op when logging was never initialized.
pub fn restore() {
    if let Some(state) = STATE.get() {
        match EnvFilter::try_new(&state.directives) {
            Ok(filter) => {
                if let Err(e) = state.handle.reload(filter) {
                    eprintln!("Failed to restore log filter: {}", e);
                }
            }
            Err(e) => eprintln!("Failed to rebuild log filter: {}", e),
        }
    }
}
