//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use silo_core::message::Message;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `messages` row.
pub struct RawMessage {
  pub key:                String,
  pub previous_message:   Option<String>,
  pub author:             String,
  pub content:            String,
  pub timestamp_received: String,
  pub timestamp_asserted: String,
}

impl RawMessage {
  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      key:                self.key,
      previous_message:   self.previous_message,
      author:             self.author,
      content:            self.content,
      timestamp_received: decode_dt(&self.timestamp_received)?,
      timestamp_asserted: decode_dt(&self.timestamp_asserted)?,
    })
  }
}
