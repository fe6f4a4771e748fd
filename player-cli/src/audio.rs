//! Rodio-backed decode/render collaborator.
//!
//! Decodes the byte stream arriving through the conduit and plays it on
//! the default output device. Runs synchronously on the renderer actor's
//! blocking task until the conduit is exhausted.

use std::io::{self, Read, Seek, SeekFrom};

use rodio::{Decoder, OutputStream, Sink};
use tracing::debug;

use core_playback::{AudioRenderer, ConduitReader, PlaybackError};

/// Plays conduit audio through the default rodio output device.
pub struct RodioRenderer;

impl AudioRenderer for RodioRenderer {
    fn render(&self, input: ConduitReader) -> core_playback::Result<()> {
        let (_stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::Render(format!("No output device: {}", e)))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| PlaybackError::Render(format!("Cannot create sink: {}", e)))?;

        let source = Decoder::new(RewindBuffer::new(input))
            .map_err(|e| PlaybackError::Render(format!("Decode failed: {}", e)))?;

        sink.append(source);
        sink.sleep_until_end();
        debug!("Render drained its input");
        Ok(())
    }
}

/// Adapts the forward-only conduit reader to the `Read + Seek` bound the
/// rodio decoder wants for format probing.
///
/// Every byte pulled from the conduit is retained, so seeks anywhere
/// within the already-received prefix (which is all the probe does)
/// succeed; seeking relative to the end of a live stream is
/// unsupportable and reported as such.
struct RewindBuffer {
    inner: ConduitReader,
    cache: Vec<u8>,
    pos: usize,
}

impl RewindBuffer {
    fn new(inner: ConduitReader) -> Self {
        Self {
            inner,
            cache: Vec::new(),
            pos: 0,
        }
    }

    /// Pull from the conduit until the cache covers `target`, or EOF.
    fn fill_to(&mut self, target: usize) -> io::Result<()> {
        let mut buf = [0u8; 8192];
        while self.cache.len() < target {
            let n = self.inner.read(&mut buf)?;
            if n == 0 {
                break;
            }
            self.cache.extend_from_slice(&buf[..n]);
        }
        Ok(())
    }
}

impl Read for RewindBuffer {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.pos == self.cache.len() {
            let n = self.inner.read(buf)?;
            self.cache.extend_from_slice(&buf[..n]);
            self.pos += n;
            return Ok(n);
        }
        let available = &self.cache[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

impl Seek for RewindBuffer {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => offset as i64,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "cannot seek from the end of a live stream",
                ));
            }
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start",
            ));
        }
        let target = target as usize;
        if target > self.cache.len() {
            self.fill_to(target)?;
        }
        self.pos = target.min(self.cache.len());
        Ok(self.pos as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_playback::conduit;

    #[test]
    fn rewind_buffer_replays_consumed_bytes() {
        let (writer, reader) = conduit();
        writer.write(b"abcdef").unwrap();
        writer.close();

        let mut rb = RewindBuffer::new(reader);
        let mut buf = [0u8; 4];
        rb.read_exact(&mut buf).unwrap();
        assert_eq!(&buf, b"abcd");

        rb.seek(SeekFrom::Start(0)).unwrap();
        let mut all = Vec::new();
        rb.read_to_end(&mut all).unwrap();
        assert_eq!(all, b"abcdef");
    }

    #[test]
    fn rewind_buffer_rejects_end_relative_seeks() {
        let (writer, reader) = conduit();
        writer.close();
        let mut rb = RewindBuffer::new(reader);
        assert!(rb.seek(SeekFrom::End(0)).is_err());
    }
}
