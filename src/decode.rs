use std::io::{self, Read};

use serde::Deserialize;
use serde_json::error::Category;
use tracing::trace;

use crate::error::Error;
use crate::stream::{is_space, Shape, TrackingReader};

/// A decoded JSON document: a generic key-value tree.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Outcome of one decode attempt.
#[derive(Debug)]
pub enum Decoded {
    /// A complete document.
    Doc(Document),
    /// A span of input could not be parsed as one document. The exact bytes
    /// the decoder examined are waiting in the recovery buffer, available
    /// through [`DocumentDecoder::take_span`].
    Malformed,
}

/// Incremental decoder over a tracking source, in one of two framing modes.
///
/// In array mode the opening `[` is consumed up front and `,`/`]` tokens are
/// handled between elements; in sequence mode documents are separated only
/// by whitespace. Each decode attempt runs against fresh decoder state, so
/// after a failure the next attempt resumes at the byte immediately past
/// the failed span.
#[derive(Debug)]
pub struct DocumentDecoder<R> {
    source: TrackingReader<R>,
    shape: Shape,
    first: bool,
    done: bool,
}

impl<R: Read> DocumentDecoder<R> {
    /// Build a decoder in the sniffed framing mode.
    ///
    /// In array mode this consumes leading whitespace plus the opening `[`
    /// and discards both from the recovery buffer: the opener frames the
    /// stream and is never part of any document or echo.
    pub fn new(mut source: TrackingReader<R>, shape: Shape) -> Result<Self, Error> {
        let mut done = false;
        if shape == Shape::Array {
            match skip_whitespace(&mut source)? {
                Some(b'[') => source.reset(),
                // The sniffer only classifies on '['; tolerate anything
                // else by letting the element loop deal with it.
                Some(other) => source.unread(other),
                None => done = true,
            }
        }
        Ok(Self {
            source,
            shape,
            first: true,
            done,
        })
    }

    /// Attempt to decode the next document.
    ///
    /// `Ok(None)` means the stream is exhausted (or the array's closing `]`
    /// was reached; bytes after it are left unread). On `Decoded::Malformed`
    /// the caller collects the failed span via [`Self::take_span`] and calls
    /// again to resynchronize.
    pub fn next_document(&mut self) -> Result<Option<Decoded>, Error> {
        if self.done {
            return Ok(None);
        }
        match self.shape {
            Shape::Sequence => self.next_in_sequence(),
            Shape::Array => self.next_in_array(),
        }
    }

    /// Bytes consumed since the last checkpoint: one attempt's documents
    /// plus any separators/whitespace read before it.
    pub fn take_span(&mut self) -> Vec<u8> {
        self.source.take_recovered()
    }

    /// Drop the bytes of a successfully decoded document.
    pub fn discard_span(&mut self) {
        self.source.reset();
    }

    fn next_in_sequence(&mut self) -> Result<Option<Decoded>, Error> {
        let next = serde_json::Deserializer::from_reader(&mut self.source)
            .into_iter::<Document>()
            .next();
        match next {
            None => {
                self.done = true;
                Ok(None)
            }
            Some(Ok(doc)) => Ok(Some(Decoded::Doc(doc))),
            Some(Err(err)) => classify_failure(err),
        }
    }

    fn next_in_array(&mut self) -> Result<Option<Decoded>, Error> {
        let mut separated = false;
        loop {
            match skip_whitespace(&mut self.source)? {
                None => {
                    self.done = true;
                    return Ok(None);
                }
                Some(b']') => {
                    self.done = true;
                    self.source.reset();
                    return Ok(None);
                }
                Some(b',') if !self.first && !separated => {
                    // Separator between elements, not part of any document.
                    separated = true;
                    self.source.reset();
                }
                Some(other) => {
                    self.source.unread(other);
                    break;
                }
            }
        }
        self.first = false;

        let next = {
            let mut de = serde_json::Deserializer::from_reader(&mut self.source);
            Document::deserialize(&mut de)
        };
        match next {
            Ok(doc) => Ok(Some(Decoded::Doc(doc))),
            Err(err) => classify_failure(err),
        }
    }
}

fn classify_failure(err: serde_json::Error) -> Result<Option<Decoded>, Error> {
    if err.classify() == Category::Io {
        let kind = err.io_error_kind().unwrap_or(io::ErrorKind::Other);
        return Err(Error::Io(io::Error::new(kind, err)));
    }
    trace!(target: "jtoh::decode", error = %err, "decode attempt failed");
    Ok(Some(Decoded::Malformed))
}

fn skip_whitespace<R: Read>(source: &mut TrackingReader<R>) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    loop {
        if source.read(&mut byte)? == 0 {
            return Ok(None);
        }
        if !is_space(byte[0]) {
            return Ok(Some(byte[0]));
        }
    }
}
