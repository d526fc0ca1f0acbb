use thiserror::Error;

/// Errors surfaced by the jtoh core.
///
/// Malformed JSON in the input is deliberately absent here: decode failures
/// are recovered as echo output, never as errors. Only a bad selector
/// (fatal before any streaming starts) and I/O failures on the underlying
/// byte streams abort a run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid selector: {0}")]
    InvalidSelector(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
