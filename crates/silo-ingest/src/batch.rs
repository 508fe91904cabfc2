//! Fixed-size batching of decoded messages.

use silo_core::message::Message;

/// An ordered buffer that releases its contents in fixed-size batches.
///
/// Memory held is bounded by `batch_size`: the pipeline commits every
/// released batch before pushing anything further, so at most one
/// batch worth of records is ever buffered.
#[derive(Debug)]
pub struct BatchAccumulator {
  buffer:     Vec<Message>,
  batch_size: usize,
}

impl BatchAccumulator {
  /// `batch_size` must be positive.
  pub fn new(batch_size: usize) -> Self {
    assert!(batch_size > 0, "batch_size must be positive");
    Self {
      buffer: Vec::with_capacity(batch_size),
      batch_size,
    }
  }

  /// Append one message. Returns the full batch exactly when the
  /// threshold is reached, leaving the buffer empty.
  pub fn push(&mut self, message: Message) -> Option<Vec<Message>> {
    self.buffer.push(message);
    if self.buffer.len() == self.batch_size {
      let next = Vec::with_capacity(self.batch_size);
      Some(std::mem::replace(&mut self.buffer, next))
    } else {
      None
    }
  }

  /// Whatever is still buffered after the stream ends; possibly empty.
  pub fn drain_remainder(&mut self) -> Vec<Message> {
    std::mem::take(&mut self.buffer)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::DateTime;

  use super::*;

  fn message(key: &str) -> Message {
    Message {
      key:                key.to_owned(),
      previous_message:   None,
      author:             "@A".to_owned(),
      content:            r#""x.box""#.to_owned(),
      timestamp_received: DateTime::from_timestamp_millis(1).unwrap(),
      timestamp_asserted: DateTime::from_timestamp_millis(0).unwrap(),
    }
  }

  #[test]
  fn releases_exactly_at_threshold() {
    let mut batch = BatchAccumulator::new(2);

    assert!(batch.push(message("%m1")).is_none());
    let full = batch.push(message("%m2")).expect("full batch");
    assert_eq!(full.len(), 2);
    assert_eq!(full[0].key, "%m1");
    assert_eq!(full[1].key, "%m2");

    // Buffer starts over after a release.
    assert!(batch.push(message("%m3")).is_none());
    assert_eq!(batch.drain_remainder().len(), 1);
  }

  #[test]
  fn drain_remainder_empties_the_buffer() {
    let mut batch = BatchAccumulator::new(10);
    batch.push(message("%m1"));

    let rest = batch.drain_remainder();
    assert_eq!(rest.len(), 1);
    assert!(batch.drain_remainder().is_empty());
  }

  #[test]
  #[should_panic(expected = "batch_size must be positive")]
  fn zero_batch_size_panics() {
    BatchAccumulator::new(0);
  }
}
