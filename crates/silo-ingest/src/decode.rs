//! Decoding one feed-log line into a [`Message`] plus a structural
//! view of its payload.

use chrono::{DateTime, TimeZone as _, Utc};
use serde::Deserialize;
use serde_json::Value;
use silo_core::message::{ContentView, Message};

use crate::error::DecodeError;

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// Outer shape of one log line.
#[derive(Deserialize)]
struct Envelope {
  key:       String,
  /// Receipt time, epoch milliseconds (possibly fractional).
  timestamp: f64,
  value:     EnvelopeValue,
}

#[derive(Deserialize)]
struct EnvelopeValue {
  previous:  Option<String>,
  author:    String,
  /// Time claimed by the message itself, epoch milliseconds.
  timestamp: f64,
  content:   Value,
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// One decoded line: the record to persist plus the aggregation view
/// of its raw payload.
#[derive(Debug, Clone)]
pub struct Decoded {
  pub message: Message,
  pub view:    ContentView,
}

/// Parse one line of the log.
///
/// Any parse or shape violation is an error; the pipeline aborts the
/// whole run on the first malformed line.
pub fn decode(line: &str) -> Result<Decoded, DecodeError> {
  let envelope: Envelope = serde_json::from_str(line)?;

  let view = ContentView::of(&envelope.value.content);
  let content = serde_json::to_string(&envelope.value.content)?;

  let message = Message {
    key:                envelope.key,
    previous_message:   envelope.value.previous,
    author:             envelope.value.author,
    content,
    timestamp_received: millis_to_dt(envelope.timestamp)?,
    timestamp_asserted: millis_to_dt(envelope.value.timestamp)?,
  };

  Ok(Decoded { message, view })
}

/// Epoch milliseconds, as the log records them, to `DateTime<Utc>`.
/// Fractional milliseconds are truncated.
fn millis_to_dt(millis: f64) -> Result<DateTime<Utc>, DecodeError> {
  Utc
    .timestamp_millis_opt(millis as i64)
    .single()
    .ok_or(DecodeError::Timestamp(millis))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
