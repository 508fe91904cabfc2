//! Error types for the ingestion pipeline.
//!
//! None of these are retried or downgraded: every error surfaces to
//! the caller and terminates the run, leaving whatever prior flushes
//! already committed in the store.

use thiserror::Error;

/// A line that could not be decoded into a message.
#[derive(Debug, Error)]
pub enum DecodeError {
  #[error("invalid message json: {0}")]
  Json(#[from] serde_json::Error),

  /// An epoch-milliseconds value outside the representable range.
  #[error("timestamp out of range: {0}")]
  Timestamp(f64),
}

/// A failed ingestion run, generic over the store backend's error.
#[derive(Debug, Error)]
pub enum IngestError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// The log resource could not be opened or read.
  #[error("log read error: {0}")]
  Resource(#[from] std::io::Error),

  /// A line was not a well-formed message; `line` is 1-based. The run
  /// aborts before any later line is processed.
  #[error("malformed message on line {line}: {source}")]
  Decode { line: u64, source: DecodeError },

  /// A message flush or the author-snapshot write failed.
  #[error("store write error: {0}")]
  Write(E),
}
