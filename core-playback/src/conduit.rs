//! # Byte Conduit
//!
//! An ordered, blocking, in-memory byte pipe connecting the stream
//! receiver (write end) to the playback renderer (read end).
//!
//! ## Design
//!
//! - **Ordering**: bytes are read in exactly the order they were written.
//! - **Blocking**: a read past the written data blocks until more bytes
//!   arrive or the write end closes (end-of-data after draining).
//! - **Closure**: a write after the read end closed fails immediately;
//!   closing either end is idempotent and wakes any blocked reader, so a
//!   pending call returns instead of hanging.
//! - **Buffering**: unbounded; the conduit's only obligation is to
//!   deliver what was written, in order.
//!
//! Both ends are cheaply cloneable handles over the same shared state,
//! which lets the playback coordinator keep a handle of each for
//! teardown while the worker tasks own their operating clones.
//!
//! ## Usage
//!
//! ```rust
//! use std::io::Read;
//! use core_playback::conduit::conduit;
//!
//! let (writer, mut reader) = conduit();
//! writer.write(b"abc").unwrap();
//! writer.close();
//!
//! let mut out = Vec::new();
//! reader.read_to_end(&mut out).unwrap();
//! assert_eq!(out, b"abc");
//! ```

use std::collections::VecDeque;
use std::io;

use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use thiserror::Error;

/// The read end of the conduit was closed before (or during) a write.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("conduit read end closed")]
pub struct ConduitClosed;

struct State {
    buffer: VecDeque<u8>,
    write_closed: bool,
    read_closed: bool,
    writer_handles: usize,
    reader_handles: usize,
}

struct Shared {
    state: Mutex<State>,
    data_ready: Condvar,
}

/// Create a connected conduit pair.
pub fn conduit() -> (ConduitWriter, ConduitReader) {
    let shared = Arc::new(Shared {
        state: Mutex::new(State {
            buffer: VecDeque::new(),
            write_closed: false,
            read_closed: false,
            writer_handles: 1,
            reader_handles: 1,
        }),
        data_ready: Condvar::new(),
    });
    (
        ConduitWriter {
            shared: Arc::clone(&shared),
        },
        ConduitReader { shared },
    )
}

/// Write end of the conduit.
pub struct ConduitWriter {
    shared: Arc<Shared>,
}

impl Clone for ConduitWriter {
    fn clone(&self) -> Self {
        self.shared.state.lock().writer_handles += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl ConduitWriter {
    /// Append `data` to the conduit, waking any blocked reader.
    ///
    /// Fails immediately once the read end (or this end) has been closed;
    /// nothing is written in that case.
    pub fn write(&self, data: &[u8]) -> Result<(), ConduitClosed> {
        let mut state = self.shared.state.lock();
        if state.read_closed || state.write_closed {
            return Err(ConduitClosed);
        }
        state.buffer.extend(data);
        drop(state);
        self.shared.data_ready.notify_all();
        Ok(())
    }

    /// Close the write end. Idempotent.
    ///
    /// Readers drain the remaining buffered bytes and then observe
    /// end-of-data.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        state.write_closed = true;
        drop(state);
        self.shared.data_ready.notify_all();
    }

    /// Whether the write end has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().write_closed
    }
}

impl Drop for ConduitWriter {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.writer_handles -= 1;
        // Last write handle gone means no more data can ever arrive.
        if state.writer_handles == 0 {
            state.write_closed = true;
            drop(state);
            self.shared.data_ready.notify_all();
        }
    }
}

/// Read end of the conduit. Implements [`std::io::Read`].
pub struct ConduitReader {
    shared: Arc<Shared>,
}

impl Clone for ConduitReader {
    fn clone(&self) -> Self {
        self.shared.state.lock().reader_handles += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl ConduitReader {
    /// Close the read end. Idempotent.
    ///
    /// Subsequent writes fail and a blocked read returns an error
    /// instead of hanging.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        state.read_closed = true;
        drop(state);
        self.shared.data_ready.notify_all();
    }

    /// Whether the read end has been closed.
    pub fn is_closed(&self) -> bool {
        self.shared.state.lock().read_closed
    }
}

impl io::Read for ConduitReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let mut state = self.shared.state.lock();
        loop {
            if state.read_closed {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, ConduitClosed));
            }
            if !state.buffer.is_empty() {
                let n = state.buffer.len().min(buf.len());
                for slot in buf.iter_mut().take(n) {
                    // Cannot be empty: n <= buffer.len().
                    *slot = state.buffer.pop_front().unwrap_or_default();
                }
                return Ok(n);
            }
            if state.write_closed {
                return Ok(0);
            }
            self.shared.data_ready.wait(&mut state);
        }
    }
}

impl Drop for ConduitReader {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.reader_handles -= 1;
        if state.reader_handles == 0 {
            state.read_closed = true;
            drop(state);
            self.shared.data_ready.notify_all();
        }
    }
}
