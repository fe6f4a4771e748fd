//! # Runtime Module
//!
//! Process-wide runtime concerns shared by every other crate in the
//! workspace.
//!
//! ## Overview
//!
//! This module provides:
//! - Structured logging bootstrap built on `tracing-subscriber`
//! - A reloadable log filter so interactive flows can quiet diagnostics
//!   while audio is playing and restore them afterwards

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_logging, LogFormat, LogLevel, LoggingConfig};
