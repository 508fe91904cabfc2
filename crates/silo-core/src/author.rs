//! Author profiles — identity metadata accumulated from "about"
//! messages.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity metadata for one author.
///
/// Each field updates independently: setting one field from a later
/// message never clears a previously set, different field, and a
/// missing or ill-typed value leaves the current one untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
  pub key:         String,
  pub name:        Option<String>,
  pub description: Option<String>,
  pub image:       Option<String>,
}

impl AuthorProfile {
  /// An empty profile for `key`.
  pub fn new(key: impl Into<String>) -> Self {
    Self {
      key: key.into(),
      ..Self::default()
    }
  }

  /// Merge the fields of one "about" message into this profile.
  ///
  /// Only well-typed values apply; malformed shapes are skipped, not
  /// rejected.
  pub fn apply_about(&mut self, fields: &Map<String, Value>) {
    if let Some(name) = fields.get("name").and_then(Value::as_str) {
      self.name = Some(name.to_owned());
    }
    if let Some(description) = fields.get("description").and_then(Value::as_str)
    {
      self.description = Some(description.to_owned());
    }

    // The image is sometimes a blob reference string and sometimes an
    // object whose `link` field holds the blob reference; anything else
    // is a malformed message we pass over.
    match fields.get("image") {
      Some(Value::String(blob)) => self.image = Some(blob.clone()),
      Some(Value::Object(image)) => {
        if let Some(link) = image.get("link").and_then(Value::as_str) {
          self.image = Some(link.to_owned());
        }
      }
      _ => {}
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
