//! # Stream Receiver
//!
//! Pulls sequential audio chunks from an open [`AudioChunkStream`] and
//! writes them into the conduit, preserving arrival order.
//!
//! Every receive is raced against the playback scope's cancellation so an
//! in-flight network call unblocks on teardown instead of hanging. The
//! run ends with exactly one close of the conduit's write end, which is
//! how the renderer detects completion.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::conduit::ConduitWriter;
use crate::error::PlaybackError;
use crate::traits::AudioChunkStream;

/// How a receiver run ended.
///
/// `Degraded` is the named home of a deliberate coercion: a mid-stream
/// transport failure is recorded here for logs and tests, but the
/// operator-facing outcome treats it as end-of-data (partial playback
/// beats a hard failure). Keeping the classification separate means a
/// stricter policy can be bolted on without restructuring the
/// coordinator.
#[derive(Debug)]
pub enum StreamEnd {
    /// The stream signalled natural end-of-data.
    Completed,
    /// A transport error cut the stream short; coerced to end-of-data.
    Degraded(PlaybackError),
    /// The playback scope was cancelled (user interrupt or teardown).
    Cancelled,
}

impl StreamEnd {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StreamEnd::Degraded(_))
    }
}

/// Receive chunks until end-of-stream, transport error, or cancellation.
///
/// Closes the conduit write end on every exit path (idempotent, so the
/// writer's own drop close cannot double-fire).
pub async fn run_receiver(
    mut stream: Box<dyn AudioChunkStream>,
    writer: ConduitWriter,
    cancel: CancellationToken,
) -> StreamEnd {
    let mut chunks_received = 0u64;
    let mut bytes_received = 0u64;

    let end = loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!(chunks_received, "Receive cancelled");
                break StreamEnd::Cancelled;
            }
            chunk = stream.next_chunk() => match chunk {
                Ok(Some(bytes)) => {
                    chunks_received += 1;
                    bytes_received += bytes.len() as u64;
                    if writer.write(&bytes).is_err() {
                        // Read end gone: teardown already ran.
                        debug!(chunks_received, "Conduit closed under receiver");
                        break StreamEnd::Cancelled;
                    }
                }
                Ok(None) => {
                    info!(chunks_received, bytes_received, "End of stream reached");
                    break StreamEnd::Completed;
                }
                Err(e) => {
                    warn!(chunks_received, error = %e, "Mid-stream receive failed, treating as end-of-data");
                    break StreamEnd::Degraded(e);
                }
            }
        }
    };

    writer.close();
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conduit::conduit;
    use crate::error::Result;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::io::Read;

    struct VecStream {
        items: Vec<Result<Option<Bytes>>>,
    }

    #[async_trait]
    impl AudioChunkStream for VecStream {
        async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
            if self.items.is_empty() {
                Ok(None)
            } else {
                self.items.remove(0)
            }
        }
    }

    #[tokio::test]
    async fn forwards_chunks_and_closes_on_end() {
        let (writer, mut reader) = conduit();
        let stream = VecStream {
            items: vec![
                Ok(Some(Bytes::from_static(b"AAA"))),
                Ok(Some(Bytes::from_static(b"BBB"))),
            ],
        };

        let end = run_receiver(Box::new(stream), writer, CancellationToken::new()).await;
        assert!(matches!(end, StreamEnd::Completed));

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"AAABBB");
    }

    #[tokio::test]
    async fn transport_error_is_classified_degraded() {
        let (writer, mut reader) = conduit();
        let stream = VecStream {
            items: vec![
                Ok(Some(Bytes::from_static(b"AAA"))),
                Err(PlaybackError::Receive("connection reset".into())),
                Ok(Some(Bytes::from_static(b"never"))),
            ],
        };

        let end = run_receiver(Box::new(stream), writer, CancellationToken::new()).await;
        assert!(end.is_degraded());

        // The bytes that made it are still delivered, then end-of-data.
        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"AAA");
    }

    #[tokio::test]
    async fn cancellation_stops_pending_receive() {
        struct PendingStream;

        #[async_trait]
        impl AudioChunkStream for PendingStream {
            async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }

        let (writer, _reader) = conduit();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let end = run_receiver(Box::new(PendingStream), writer.clone(), cancel).await;
        assert!(matches!(end, StreamEnd::Cancelled));
        assert!(writer.is_closed());
    }
}
