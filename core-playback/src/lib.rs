//! # Playback & Streaming Module
//!
//! Concurrent streaming playback pipeline for track playback.
//!
//! ## Overview
//!
//! This module handles:
//! - The ordered, blocking byte conduit between network ingress and decoding
//! - The stream receiver, playback renderer, and interrupt listener actors
//! - The playback coordinator racing natural completion against operator
//!   interrupt under a single cancellable scope
//! - Collaborator traits for the streaming service, the decode/render
//!   backend, and the operator control input
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐  chunks   ┌─────────┐  bytes   ┌──────────────────┐
//! │ Stream Receiver  │──────────▶│ Conduit │─────────▶│ Playback Renderer │
//! └──────────────────┘           └─────────┘          └──────────────────┘
//!          ▲ cancel                                         │ "finished"
//!          │                                                ▼
//! ┌──────────────────────────── Coordinator ◀──── "interrupt" ──────────┐
//! │        cancellable scope, first-of-two wait, teardown               │
//! └──────────────────────────────────────────▲──────────────────────────┘
//!                                            │
//!                                   Interrupt Listener
//! ```

pub mod conduit;
pub mod coordinator;
pub mod error;
pub mod interrupt;
pub mod receiver;
pub mod renderer;
pub mod traits;

pub use conduit::{conduit, ConduitClosed, ConduitReader, ConduitWriter};
pub use coordinator::{PlaybackCoordinator, PlaybackOutcome, Teardown};
pub use error::{PlaybackError, Result};
pub use interrupt::STOP_COMMAND;
pub use receiver::StreamEnd;
pub use traits::{AudioChunkStream, AudioEncoding, AudioRenderer, ControlSource, StreamingClient};
