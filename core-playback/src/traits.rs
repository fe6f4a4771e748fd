//! Collaborator traits consumed by the playback pipeline.
//!
//! These abstractions keep the coordinator independent of the transport,
//! the codec, and the operator console. Concrete implementations live in
//! provider and host crates; the integration tests drive the pipeline
//! with scripted fakes of the same traits.

use async_trait::async_trait;
use bytes::Bytes;
use core_catalog::TrackId;

use crate::conduit::ConduitReader;
use crate::error::Result;

/// Encodings a streaming backend can be asked for.
///
/// Playback currently pins this to [`AudioEncoding::Mp3`]; the parameter
/// exists so the request surface does not change when more encodings are
/// negotiated later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEncoding {
    Mp3,
}

impl AudioEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
        }
    }
}

/// A live server-to-client stream of audio chunks for one track.
///
/// Chunks arrive in strict order; their size is determined by the
/// transport and must not be assumed fixed.
#[async_trait]
pub trait AudioChunkStream: Send {
    /// Receive the next chunk.
    ///
    /// `Ok(None)` signals natural end-of-stream. Implementations must be
    /// cancel-safe: the receiver awaits this inside a `select!` against
    /// the playback scope's cancellation.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}

impl std::fmt::Debug for dyn AudioChunkStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AudioChunkStream")
    }
}

/// Streaming service collaborator: opens chunk streams for tracks.
#[async_trait]
pub trait StreamingClient: Send + Sync {
    /// Open a stream of encoded audio for `track`.
    ///
    /// Failure here is the only error a playback attempt escalates to
    /// the caller.
    async fn open_stream(
        &self,
        track: TrackId,
        encoding: AudioEncoding,
    ) -> Result<Box<dyn AudioChunkStream>>;
}

/// Decode/render collaborator.
///
/// Runs synchronously on a blocking task, consuming the conduit's read
/// end until it is exhausted or errors. The audible output is a side
/// channel invisible to the control logic.
pub trait AudioRenderer: Send + Sync {
    fn render(&self, input: ConduitReader) -> Result<()>;
}

/// Line-oriented operator control input.
///
/// Passed explicitly into each playback attempt so the menu's own read
/// loop and the interrupt listener never share a hidden global reader.
#[async_trait]
pub trait ControlSource: Send {
    /// Next line of operator input; `Ok(None)` means the source closed.
    ///
    /// Must be cancel-safe for the same reason as
    /// [`AudioChunkStream::next_chunk`].
    async fn next_line(&mut self) -> std::io::Result<Option<String>>;
}
