//! Projection driver: ties the shape sniffer, tracking source, incremental
//! decoder and field projector into one blocking loop that turns a stream
//! of JSON documents into delimited text lines.
//!
//! Malformed or non-JSON spans never abort the run: their exact bytes are
//! queued and echoed as their own line, interleaved with projection lines
//! in the order the source bytes appeared. The loop returns only once the
//! input is exhausted and all output has been flushed.

use std::io::{Read, Write};

use tracing::{debug, instrument, trace};

use crate::decode::{Decoded, DocumentDecoder};
use crate::error::Error;
use crate::project::render_line;
use crate::selector::Selector;
use crate::stream::{is_space, sniff_shape, TrackingReader};

/// Project `input` through `selector`, writing newline-terminated lines to
/// `output`.
///
/// Blocks until EOF on the input and full flush of the output. I/O errors
/// on either stream propagate; JSON decode failures degrade to echo lines
/// instead.
#[instrument(target = "jtoh::transform", skip_all, fields(paths = selector.field_paths().len()))]
pub fn project<R: Read, W: Write>(
    selector: &Selector,
    input: R,
    mut output: W,
) -> Result<(), Error> {
    let (shape, input) = sniff_shape(input)?;
    let source = TrackingReader::new(input);
    let mut decoder = DocumentDecoder::new(source, shape)?;

    // Raw bytes from failed decode attempts, queued until the next
    // successful document (or EOF) so echo and projection lines keep the
    // input's order.
    let mut pending: Vec<u8> = Vec::new();
    let mut documents = 0usize;

    while let Some(decoded) = decoder.next_document()? {
        match decoded {
            Decoded::Doc(doc) => {
                decoder.discard_span();
                flush_pending(&mut pending, &mut output)?;
                let line = render_line(selector, &doc);
                trace!(target: "jtoh::transform", line_len = line.len(), "projected document");
                output.write_all(line.as_bytes())?;
                output.write_all(b"\n")?;
                documents += 1;
            }
            Decoded::Malformed => {
                let mut span = decoder.take_span();
                if pending.is_empty() {
                    // A new recovered region: its leading whitespace is
                    // inter-value padding, not content.
                    let skip = span.iter().take_while(|b| is_space(**b)).count();
                    span.drain(..skip);
                }
                pending.extend_from_slice(&span);
            }
        }
    }

    flush_pending(&mut pending, &mut output)?;
    output.flush()?;
    debug!(target: "jtoh::transform", documents, "projection complete");
    Ok(())
}

fn flush_pending<W: Write>(pending: &mut Vec<u8>, output: &mut W) -> Result<(), Error> {
    if pending.is_empty() {
        return Ok(());
    }
    debug!(target: "jtoh::transform", bytes = pending.len(), "echoing unparsed input");
    output.write_all(pending)?;
    output.write_all(b"\n")?;
    pending.clear();
    Ok(())
}
