//! # Local Directory Provider
//!
//! Implements the catalog and streaming collaborator traits on top of a
//! local music directory, so the client runs end to end without a remote
//! backend.
//!
//! ## Overview
//!
//! This module provides:
//! - `LocalCatalog`: recursive directory scan with tag extraction via
//!   `lofty` (filename fallbacks for untagged or unreadable files),
//!   genres grouped from tag values
//! - `LocalStreaming`: chunked file streaming implementing
//!   `StreamingClient`

pub mod catalog;
pub mod error;
pub mod streaming;

pub use catalog::LocalCatalog;
pub use error::{ProviderError, Result};
pub use streaming::{LocalStreaming, CHUNK_SIZE};
