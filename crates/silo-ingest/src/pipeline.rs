//! The orchestrator: decode → accumulate → aggregate → flush.

use silo_core::store::FeedStore;
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

use crate::{
  aggregate::AuthorAggregator,
  batch::BatchAccumulator,
  decode::decode,
  error::IngestError,
  source::LineSource,
};

/// Default number of messages per transaction. Large enough to
/// amortise commit overhead, small enough to keep the buffer cheap.
pub const DEFAULT_BATCH_SIZE: usize = 1024;

// ─── Report ──────────────────────────────────────────────────────────────────

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
  /// Message rows committed.
  pub messages: u64,
  /// Transactions committed; the last one may be partial.
  pub flushes:  u64,
  /// Author profiles written by the end-of-run snapshot.
  pub authors:  usize,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

/// Drives one ingestion run against a [`FeedStore`] backend.
pub struct Pipeline<'s, S> {
  store:      &'s S,
  batch_size: usize,
}

impl<'s, S: FeedStore> Pipeline<'s, S> {
  pub fn new(store: &'s S) -> Self {
    Self {
      store,
      batch_size: DEFAULT_BATCH_SIZE,
    }
  }

  /// Override the flush threshold. `batch_size` must be positive.
  pub fn with_batch_size(mut self, batch_size: usize) -> Self {
    assert!(batch_size > 0, "batch_size must be positive");
    self.batch_size = batch_size;
    self
  }

  /// Ingest the whole of `source`.
  ///
  /// Strictly sequential: the next line is not read until the current
  /// one is accumulated, and nothing is appended to a buffer while its
  /// flush is in flight. The run is complete only once the final flush
  /// and the author snapshot have both committed; any error aborts it
  /// with whatever prior flushes already committed.
  pub async fn run<R>(
    &self,
    mut source: LineSource<R>,
  ) -> Result<IngestReport, IngestError<S::Error>>
  where
    R: AsyncBufRead + Unpin,
  {
    debug!(batch_size = self.batch_size, "starting ingestion run");

    let mut batch = BatchAccumulator::new(self.batch_size);
    let mut aggregator = AuthorAggregator::new();
    let mut line_number: u64 = 0;
    let mut written: u64 = 0;
    let mut flushes: u64 = 0;

    while let Some(line) = source.next_line().await? {
      line_number += 1;

      let decoded = decode(&line).map_err(|source| IngestError::Decode {
        line: line_number,
        source,
      })?;

      aggregator.observe(&decoded.message.author, &decoded.view);

      if let Some(full) = batch.push(decoded.message) {
        written += full.len() as u64;
        self
          .store
          .append_messages(full)
          .await
          .map_err(IngestError::Write)?;
        flushes += 1;
        info!(written, "flushed message batch");
      }
    }

    // Whatever is still buffered after EOF goes out in one final,
    // possibly partial, transaction.
    let remainder = batch.drain_remainder();
    if !remainder.is_empty() {
      written += remainder.len() as u64;
      self
        .store
        .append_messages(remainder)
        .await
        .map_err(IngestError::Write)?;
      flushes += 1;
      info!(written, "flushed final batch");
    }

    let authors = aggregator.len();
    info!(authors, "writing author snapshot");
    self
      .store
      .put_authors(aggregator.into_snapshot())
      .await
      .map_err(IngestError::Write)?;

    Ok(IngestReport {
      messages: written,
      flushes,
      authors,
    })
  }
}
