//! # Playback Coordinator
//!
//! Owns the single cancellable scope of a playback attempt and races the
//! two terminal events against each other.
//!
//! ## Lifecycle
//!
//! ```text
//!  starting ──open_stream──▶ streaming ──first event──▶ torn-down
//!     │                          │
//!     └─ open failure:           ├─ "finished"  ──▶ Completed
//!        error, no actors        └─ "interrupt" ──▶ Interrupted
//! ```
//!
//! One attempt is single-shot: the conduit, the child cancellation
//! token, and both notification channels are created fresh per call and
//! fully discarded at its end. Teardown (cancel the scope, close both
//! conduit ends) is the single exit action for both steady-state
//! transitions and is idempotent throughout.
//!
//! The coordinator does not join the worker tasks on interrupt: the
//! cancelled scope unblocks the receiver's in-flight receive and the
//! closed conduit unblocks a pending render read, so the actors drain on
//! their own while control returns to the menu immediately.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use core_catalog::Track;

use crate::conduit::{conduit, ConduitReader, ConduitWriter};
use crate::error::{PlaybackError, Result};
use crate::interrupt::run_interrupt_listener;
use crate::receiver::run_receiver;
use crate::renderer::spawn_renderer;
use crate::traits::{AudioEncoding, AudioRenderer, ControlSource, StreamingClient};

/// Terminal classification of a playback attempt, produced exactly once.
///
/// A stream that could not be opened is not an outcome; it surfaces as
/// [`PlaybackError::StreamOpen`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// The stream ran to its natural end (or degraded to it).
    Completed,
    /// The operator issued the stop command first.
    Interrupted,
}

impl PlaybackOutcome {
    pub fn was_interrupted(self) -> bool {
        matches!(self, PlaybackOutcome::Interrupted)
    }
}

/// The single exit action of an attempt: cancel the scope and close both
/// conduit ends.
///
/// Cancelling propagates into the receiver's in-flight network receive;
/// closing the conduit unblocks a pending render read. All three steps
/// are idempotent, so running teardown twice is a no-op the second time.
pub struct Teardown {
    scope: CancellationToken,
    writer: ConduitWriter,
    reader: ConduitReader,
}

impl Teardown {
    pub fn new(scope: CancellationToken, writer: ConduitWriter, reader: ConduitReader) -> Self {
        Self {
            scope,
            writer,
            reader,
        }
    }

    pub fn run(&self) {
        self.scope.cancel();
        self.writer.close();
        self.reader.close();
    }
}

/// Coordinates one streaming playback attempt at a time.
pub struct PlaybackCoordinator {
    streaming: Arc<dyn StreamingClient>,
    renderer: Arc<dyn AudioRenderer>,
}

impl PlaybackCoordinator {
    pub fn new(streaming: Arc<dyn StreamingClient>, renderer: Arc<dyn AudioRenderer>) -> Self {
        Self {
            streaming,
            renderer,
        }
    }

    /// Play `track` until it finishes or the operator interrupts it.
    ///
    /// Launches the stream receiver, the playback renderer, and the
    /// interrupt listener concurrently, then blocks on the first of the
    /// two one-shot notifications. `control` is scoped to this attempt.
    ///
    /// # Errors
    ///
    /// Only a stream-open failure is escalated; every mid-flight failure
    /// degrades to [`PlaybackOutcome::Completed`].
    #[instrument(skip_all, fields(track = %track.id, title = %track.title))]
    pub async fn play<C>(
        &self,
        track: &Track,
        control: C,
        parent: &CancellationToken,
    ) -> Result<PlaybackOutcome>
    where
        C: ControlSource + 'static,
    {
        let scope = parent.child_token();
        // If this future is dropped mid-attempt the scope still cancels.
        let _cancel_guard = scope.clone().drop_guard();

        let stream = match self
            .streaming
            .open_stream(track.id, AudioEncoding::Mp3)
            .await
        {
            Ok(stream) => stream,
            Err(e @ PlaybackError::StreamOpen(_)) => return Err(e),
            Err(other) => return Err(PlaybackError::StreamOpen(other.to_string())),
        };

        info!("Stream opened, launching playback actors");

        let (writer, reader) = conduit();
        let (finished_tx, finished_rx) = oneshot::channel();
        let (stop_tx, stop_rx) = oneshot::channel();
        let teardown = Teardown::new(scope.clone(), writer.clone(), reader.clone());

        // Detached on purpose: the coordinator never joins its actors.
        let _receiver_task = tokio::spawn(run_receiver(stream, writer, scope.clone()));
        let _renderer_task = spawn_renderer(Arc::clone(&self.renderer), reader, finished_tx);
        let _listener_task = tokio::spawn(run_interrupt_listener(control, scope.clone(), stop_tx));

        // A listener that exits without signalling (closed control input)
        // drops its sender; that must not count as an interrupt.
        let interrupted = async {
            if stop_rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            _ = interrupted => {
                teardown.run();
                info!("Playback interrupted by operator");
                Ok(PlaybackOutcome::Interrupted)
            }
            // A dropped finished sender means the renderer is gone, which
            // is indistinguishable from end-of-data by policy.
            _ = finished_rx => {
                teardown.run();
                core_runtime::logging::restore();
                info!("Playback finished");
                Ok(PlaybackOutcome::Completed)
            }
        }
    }
}
