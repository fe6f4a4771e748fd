//! # Playback Renderer Actor
//!
//! Runs the synchronous [`AudioRenderer`] collaborator on a blocking
//! task, feeding it the conduit's read end, and fires the one-shot
//! "finished" notification when the render call returns.
//!
//! Render errors are not distinguished from reaching end-of-data: either
//! way the notification fires and the coordinator decides what it means
//! by which event it observes first. After an interrupt the coordinator
//! has already dropped the receiving half, so the send harmlessly fails.

use std::sync::Arc;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::conduit::ConduitReader;
use crate::traits::AudioRenderer;

/// Spawn the renderer actor.
///
/// The returned handle is not joined by the coordinator; it exists for
/// tests that want to await actor exit.
pub fn spawn_renderer(
    renderer: Arc<dyn AudioRenderer>,
    input: ConduitReader,
    finished_tx: oneshot::Sender<()>,
) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = renderer.render(input) {
            debug!(error = %e, "Render ended with error, treated as end-of-data");
        }
        // One-shot by construction; ignored when the coordinator already
        // moved on after an interrupt.
        let _ = finished_tx.send(());
    })
}
