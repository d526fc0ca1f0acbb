use std::io::{self, Cursor, Read};

use tracing::debug;

/// Framing of the input stream: a single JSON array of documents, or a run
/// of independent documents separated only by whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Array,
    Sequence,
}

/// Classify the input by its first significant byte.
///
/// Leading ASCII whitespace is consumed and dropped; the classifying byte
/// itself is re-prepended so downstream decoding sees it again. An input
/// that ends before any significant byte classifies as an empty sequence.
pub fn sniff_shape<R: Read>(mut input: R) -> io::Result<(Shape, impl Read)> {
    let mut byte = [0u8; 1];
    loop {
        if input.read(&mut byte)? == 0 {
            debug!(target: "jtoh::stream", "input exhausted before any significant byte");
            return Ok((Shape::Sequence, Cursor::new(Vec::new()).chain(input)));
        }
        let b = byte[0];
        if is_space(b) {
            continue;
        }
        let shape = if b == b'[' {
            Shape::Array
        } else {
            Shape::Sequence
        };
        debug!(target: "jtoh::stream", ?shape, first_byte = b, "classified input");
        return Ok((shape, Cursor::new(vec![b]).chain(input)));
    }
}

pub(crate) fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\r' || b == b'\n'
}

/// A byte source that remembers everything it hands out.
///
/// Reads delegate to the wrapped source one byte at a time; every byte
/// delivered is appended to a recovery buffer. The decoder downstream does
/// lookahead of unknown extent, and the one-byte granularity is what makes
/// "bytes consumed since the last checkpoint" exactly equal "bytes the
/// decoder examined" when a decode attempt fails.
#[derive(Debug)]
pub struct TrackingReader<R> {
    inner: R,
    recovered: Vec<u8>,
    pushback: Option<u8>,
}

impl<R: Read> TrackingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            recovered: Vec::new(),
            pushback: None,
        }
    }

    /// Take the bytes consumed since the last checkpoint, clearing it.
    pub fn take_recovered(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.recovered)
    }

    /// Drop the bytes consumed since the last checkpoint.
    pub fn reset(&mut self) {
        self.recovered.clear();
    }

    /// Push a single byte back so the next read returns it again.
    ///
    /// The byte is removed from the recovery buffer and re-recorded when it
    /// is re-read, keeping the buffer equal to exactly what downstream
    /// consumers have seen.
    pub fn unread(&mut self, byte: u8) {
        debug_assert!(self.pushback.is_none(), "single-byte pushback only");
        self.pushback = Some(byte);
        self.recovered.pop();
    }
}

impl<R: Read> Read for TrackingReader<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if out.is_empty() {
            return Ok(0);
        }
        if let Some(b) = self.pushback.take() {
            self.recovered.push(b);
            out[0] = b;
            return Ok(1);
        }
        let mut byte = [0u8; 1];
        let n = self.inner.read(&mut byte)?;
        if n > 0 {
            self.recovered.push(byte[0]);
            out[0] = byte[0];
        }
        Ok(n)
    }
}
