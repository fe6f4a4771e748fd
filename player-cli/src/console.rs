//! Scoped console input.
//!
//! One background thread owns stdin for the whole process and pumps
//! complete lines into a channel. Every consumer — the menu's prompts
//! and the per-attempt [`ControlSource`] handed to the playback
//! coordinator — draws from that single channel through a [`Console`]
//! handle, so the two read loops can never steal bytes from each other
//! and no global reader is shared implicitly.
//!
//! The pump thread blocks in the OS read for the process lifetime; the
//! async consumers are fully cancellable, which is what lets the
//! interrupt listener unblock on teardown.

use std::io::BufRead;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use core_playback::ControlSource;

/// Cloneable handle over the process-wide stdin line pump.
#[derive(Clone)]
pub struct Console {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl Console {
    /// Start the stdin pump and return the first handle.
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        debug!("Stdin pump stopped: {}", e);
                        return;
                    }
                }
            }
        });
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    #[cfg(test)]
    fn scripted(lines: Vec<&str>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            tx.send(line.to_string()).expect("receiver alive");
        }
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next full line of operator input; `None` once stdin closed.
    pub async fn read_line(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// A [`ControlSource`] scoped to one playback attempt.
    pub fn control(&self) -> ConsoleControl {
        ConsoleControl {
            console: self.clone(),
        }
    }
}

/// Per-attempt control input backed by the shared console.
pub struct ConsoleControl {
    console: Console,
}

#[async_trait]
impl ControlSource for ConsoleControl {
    async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.console.read_line().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn control_and_prompt_reads_share_one_stream() {
        let console = Console::scripted(vec!["first", "second"]);
        let mut control = console.control();

        assert_eq!(control.next_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(console.read_line().await.as_deref(), Some("second"));
        assert_eq!(console.read_line().await, None);
    }
}
