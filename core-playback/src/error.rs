//! # Playback Error Types
//!
//! Error taxonomy for the streaming playback pipeline.
//!
//! Only stream-open failures escalate out of a playback attempt; every
//! mid-flight failure (receive, render, conduit) degrades to the
//! completed-naturally outcome. The variants still exist so the receiver
//! can classify what actually happened and the logs stay honest.

use thiserror::Error;

use crate::conduit::ConduitClosed;

/// Errors that can occur during playback operations.
#[derive(Error, Debug)]
pub enum PlaybackError {
    // ========================================================================
    // Stream Errors
    // ========================================================================
    /// The streaming request could not be established. Fatal to the
    /// attempt; no actors are launched.
    #[error("Failed to open audio stream: {0}")]
    StreamOpen(String),

    /// A chunk receive failed after streaming began.
    #[error("Stream receive failed: {0}")]
    Receive(String),

    // ========================================================================
    // Pipeline Errors
    // ========================================================================
    /// The conduit was closed under a pending write.
    #[error("Conduit closed: {0}")]
    Conduit(#[from] ConduitClosed),

    /// Decode/render failed.
    #[error("Render failed: {0}")]
    Render(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error (should not occur in normal operation).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlaybackError {
    /// Returns `true` if this error means the attempt never started
    /// (distinct from both steady-state outcomes).
    pub fn is_start_failure(&self) -> bool {
        matches!(self, PlaybackError::StreamOpen(_))
    }
}

/// Result type for playback operations.
pub type Result<T> = std::result::Result<T, PlaybackError>;
