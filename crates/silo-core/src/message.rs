//! Message types — the unit of the append-only feed log.
//!
//! A message is decoded exactly once from one input line and written
//! exactly once; it is never mutated after decode. The core enforces no
//! key-uniqueness or chain-validity constraint: duplicate keys and
//! broken `previous_message` chains pass through unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── Message ─────────────────────────────────────────────────────────────────

/// One feed-log message, normalized for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
  /// Message identifier; fixed-format but opaque to the core.
  pub key:                String,
  /// The author's prior message key; `None` for an author's first
  /// message. Never validated against the log.
  pub previous_message:   Option<String>,
  /// Identifier of the authoring identity.
  pub author:             String,
  /// Payload serialized to canonical JSON text. Opaque to the store.
  pub content:            String,
  /// When the log observed and recorded the message.
  pub timestamp_received: DateTime<Utc>,
  /// Time claimed by the message's own payload; untrusted.
  pub timestamp_asserted: DateTime<Utc>,
}

// ─── ContentView ─────────────────────────────────────────────────────────────

/// Structural view of a message's raw (pre-serialization) payload,
/// used only for author-profile aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
  /// Encrypted or otherwise unreadable content (a bare string), or any
  /// other non-object payload. Never inspected further.
  Opaque,
  /// Readable structured content.
  Structured(Map<String, Value>),
}

impl ContentView {
  /// Classify a raw payload value.
  pub fn of(raw: &Value) -> Self {
    match raw {
      Value::Object(fields) => Self::Structured(fields.clone()),
      _ => Self::Opaque,
    }
  }

  /// The payload's declared type discriminant, if it has one.
  pub fn message_type(&self) -> Option<&str> {
    match self {
      Self::Structured(fields) => fields.get("type")?.as_str(),
      Self::Opaque => None,
    }
  }

  /// The fields of an `"about"` message, or `None` for anything else.
  pub fn about_fields(&self) -> Option<&Map<String, Value>> {
    match self {
      Self::Structured(fields) if self.message_type() == Some("about") => {
        Some(fields)
      }
      _ => None,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn string_content_is_opaque() {
    let view = ContentView::of(&json!("gobbledygook.box"));
    assert_eq!(view, ContentView::Opaque);
    assert!(view.about_fields().is_none());
  }

  #[test]
  fn non_object_non_string_content_is_opaque() {
    // The original log format promises object|string, but other JSON
    // values were never rejected; they just carry no structure.
    assert_eq!(ContentView::of(&json!(5)), ContentView::Opaque);
    assert_eq!(ContentView::of(&json!(null)), ContentView::Opaque);
    assert_eq!(ContentView::of(&json!([1, 2])), ContentView::Opaque);
  }

  #[test]
  fn about_fields_requires_about_type() {
    let about = ContentView::of(&json!({ "type": "about", "name": "A" }));
    assert!(about.about_fields().is_some());

    let post = ContentView::of(&json!({ "type": "post", "text": "hi" }));
    assert_eq!(post.message_type(), Some("post"));
    assert!(post.about_fields().is_none());

    let untyped = ContentView::of(&json!({ "name": "A" }));
    assert!(untyped.message_type().is_none());
    assert!(untyped.about_fields().is_none());
  }
}
