//! # Byte Sinks
//!
//! Every command the session produces is appended to a [`ByteSink`]. A sink
//! is append-only: bytes are never reordered, merged, or truncated, and
//! whatever was appended is immediately visible to whoever owns the sink.
//!
//! Two sinks are provided:
//!
//! - `Vec<u8>`: in-memory accumulator, read back once the job is complete
//! - [`WriterSink`]: forwards to any [`std::io::Write`] (a socket, a device
//!   file, stdout)
//!
//! ## Example
//!
//! ```
//! use escpos_press::sink::{ByteSink, WriterSink};
//!
//! let mut sink = WriterSink::new(Vec::new());
//! sink.push_bytes(b"\x1B@");
//! sink.push_bytes(b"hello");
//! assert_eq!(sink.bytes_written(), 7);
//! assert_eq!(sink.finish().unwrap(), b"\x1B@hello".to_vec());
//! ```

use std::io::{self, Write};

/// Append-only destination for printer bytes.
pub trait ByteSink {
    /// Append `bytes` in order. A zero-length slice is a no-op.
    fn push_bytes(&mut self, bytes: &[u8]);
}

impl ByteSink for Vec<u8> {
    #[inline]
    fn push_bytes(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    #[inline]
    fn push_bytes(&mut self, bytes: &[u8]) {
        (**self).push_bytes(bytes);
    }
}

/// # Pass-through sink
///
/// Forwards every append straight to the wrapped writer.
///
/// Write failures are owned by the sink, not by the encoder: the first
/// error is latched, every later append is dropped, and the error comes
/// back out of [`WriterSink::finish`].
pub struct WriterSink<W: Write> {
    inner: W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            written: 0,
            error: None,
        }
    }

    /// Number of bytes accepted by the underlying writer so far.
    pub fn bytes_written(&self) -> usize {
        self.written
    }

    /// The latched write error, if any.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Flush the writer and hand it back, or report the first write failure.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn push_bytes(&mut self, bytes: &[u8]) {
        if bytes.is_empty() || self.error.is_some() {
            return;
        }
        match self.inner.write_all(bytes) {
            Ok(()) => self.written += bytes.len(),
            Err(err) => {
                log::warn!("sink write failed after {} bytes: {}", self.written, err);
                self.error = Some(err);
            }
        }
    }
}
