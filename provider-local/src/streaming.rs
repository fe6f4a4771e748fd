//! Chunked file streaming over the scanned catalog.
//!
//! Stands in for a remote streaming service: chunks are fixed-size file
//! reads, delivered in order until EOF. Consumers must not rely on the
//! chunk size; a remote backend would slice differently.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::debug;

use core_catalog::TrackId;
use core_playback::{AudioChunkStream, AudioEncoding, PlaybackError, StreamingClient};

/// Size of one streamed chunk.
pub const CHUNK_SIZE: usize = 32 * 1024;

/// Streaming backend serving files recorded by a catalog scan.
pub struct LocalStreaming {
    paths: Arc<HashMap<TrackId, PathBuf>>,
}

impl LocalStreaming {
    pub fn new(paths: Arc<HashMap<TrackId, PathBuf>>) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl StreamingClient for LocalStreaming {
    async fn open_stream(
        &self,
        track: TrackId,
        encoding: AudioEncoding,
    ) -> core_playback::Result<Box<dyn AudioChunkStream>> {
        let path = self
            .paths
            .get(&track)
            .ok_or_else(|| PlaybackError::StreamOpen(format!("Unknown track id {track}")))?;

        let file = File::open(path).await.map_err(|e| {
            PlaybackError::StreamOpen(format!("Cannot open {}: {}", path.display(), e))
        })?;

        debug!(track = %track, encoding = encoding.as_str(), "Streaming {}", path.display());
        Ok(Box::new(FileChunkStream { file }))
    }
}

struct FileChunkStream {
    file: File,
}

#[async_trait]
impl AudioChunkStream for FileChunkStream {
    async fn next_chunk(&mut self) -> core_playback::Result<Option<Bytes>> {
        let mut buf = vec![0u8; CHUNK_SIZE];
        let n = self
            .file
            .read(&mut buf)
            .await
            .map_err(|e| PlaybackError::Receive(e.to_string()))?;
        if n == 0 {
            return Ok(None);
        }
        buf.truncate(n);
        Ok(Some(Bytes::from(buf)))
    }
}
