//! # Interrupt Listener
//!
//! Watches the operator control input for the stop command and fires the
//! one-shot "interrupt requested" notification.
//!
//! The blocking line read is raced against the playback scope's
//! cancellation, so the listener is guaranteed to unblock on teardown
//! instead of outliving the attempt. A closed or failing control source
//! ends the listener without a signal; playback then proceeds to natural
//! completion only.

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::traits::ControlSource;

/// The literal command that stops playback (case-sensitive, compared
/// after trimming surrounding whitespace).
pub const STOP_COMMAND: &str = "1";

/// Listen until the stop command arrives, the control source closes, or
/// the scope is cancelled. Any other input is ignored.
pub async fn run_interrupt_listener<C: ControlSource>(
    mut control: C,
    cancel: CancellationToken,
    stop_tx: oneshot::Sender<()>,
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Interrupt listener released by teardown");
                return;
            }
            line = control.next_line() => match line {
                Ok(Some(line)) if line.trim() == STOP_COMMAND => {
                    info!("Stop command received");
                    // Non-blocking; the coordinator may already be gone.
                    let _ = stop_tx.send(());
                    return;
                }
                Ok(Some(other)) => {
                    debug!(input = %other.trim(), "Ignoring non-stop input");
                }
                Ok(None) => {
                    debug!("Control input closed, playback continues to natural end");
                    return;
                }
                Err(e) => {
                    debug!(error = %e, "Control input failed, playback continues to natural end");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Lines(Vec<&'static str>);

    #[async_trait]
    impl ControlSource for Lines {
        async fn next_line(&mut self) -> std::io::Result<Option<String>> {
            if self.0.is_empty() {
                Ok(None)
            } else {
                Ok(Some(self.0.remove(0).to_string()))
            }
        }
    }

    #[tokio::test]
    async fn signals_once_on_stop_command() {
        let (tx, rx) = oneshot::channel();
        run_interrupt_listener(Lines(vec!["hello", "2", " 1 "]), CancellationToken::new(), tx)
            .await;
        assert!(rx.await.is_ok());
    }

    #[tokio::test]
    async fn closed_input_exits_without_signal() {
        let (tx, rx) = oneshot::channel();
        run_interrupt_listener(Lines(vec!["3"]), CancellationToken::new(), tx).await;
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn case_sensitive_sentinel_not_matched_by_lookalikes() {
        let (tx, rx) = oneshot::channel();
        run_interrupt_listener(Lines(vec!["01", "11", "one"]), CancellationToken::new(), tx)
            .await;
        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn cancellation_unblocks_pending_read() {
        struct Pending;

        #[async_trait]
        impl ControlSource for Pending {
            async fn next_line(&mut self) -> std::io::Result<Option<String>> {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }

        let (tx, _rx) = oneshot::channel();
        let cancel = CancellationToken::new();
        cancel.cancel();
        run_interrupt_listener(Pending, cancel, tx).await;
    }
}
