//! Incremental aggregation of author profiles from "about" messages.

use std::collections::HashMap;

use silo_core::{author::AuthorProfile, message::ContentView};

/// Accumulates one [`AuthorProfile`] per author observed in the
/// stream.
///
/// Exclusively owned by the pipeline for the duration of a run: one
/// writer, no concurrent readers, no locking.
#[derive(Debug, Default)]
pub struct AuthorAggregator {
  profiles: HashMap<String, AuthorProfile>,
}

impl AuthorAggregator {
  pub fn new() -> Self { Self::default() }

  /// Fold one message's payload view into its author's profile.
  ///
  /// A no-op unless the payload is a structured "about" message; field
  /// updates apply in observation order, so last write wins per field.
  pub fn observe(&mut self, author: &str, view: &ContentView) {
    let Some(fields) = view.about_fields() else {
      return;
    };

    self
      .profiles
      .entry(author.to_owned())
      .or_insert_with(|| AuthorProfile::new(author))
      .apply_about(fields);
  }

  /// Number of distinct authors with profile data so far.
  pub fn len(&self) -> usize { self.profiles.len() }

  pub fn is_empty(&self) -> bool { self.profiles.is_empty() }

  /// Consume the aggregator, yielding every accumulated profile.
  /// Order is unspecified.
  pub fn into_snapshot(self) -> Vec<AuthorProfile> {
    self.profiles.into_values().collect()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn view(value: serde_json::Value) -> ContentView { ContentView::of(&value) }

  #[test]
  fn about_message_creates_a_profile() {
    let mut agg = AuthorAggregator::new();
    agg.observe("@A", &view(json!({ "type": "about", "name": "Alice" })));

    let snapshot = agg.into_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].key, "@A");
    assert_eq!(snapshot[0].name.as_deref(), Some("Alice"));
  }

  #[test]
  fn opaque_content_is_ignored() {
    let mut agg = AuthorAggregator::new();
    agg.observe("@A", &ContentView::Opaque);
    assert!(agg.is_empty());
  }

  #[test]
  fn non_about_structured_content_is_ignored() {
    let mut agg = AuthorAggregator::new();
    agg.observe("@A", &view(json!({ "type": "post", "text": "hello" })));
    assert!(agg.is_empty());
  }

  #[test]
  fn later_messages_overwrite_per_field() {
    let mut agg = AuthorAggregator::new();
    agg.observe("@A", &view(json!({ "type": "about", "name": "alice" })));
    agg.observe("@A", &view(json!({ "type": "about", "name": "Alice" })));
    agg.observe("@A", &view(json!({ "type": "about", "description": "bio" })));

    let snapshot = agg.into_snapshot();
    assert_eq!(snapshot[0].name.as_deref(), Some("Alice"));
    assert_eq!(snapshot[0].description.as_deref(), Some("bio"));
  }

  #[test]
  fn authors_accumulate_separately() {
    let mut agg = AuthorAggregator::new();
    agg.observe("@A", &view(json!({ "type": "about", "name": "Alice" })));
    agg.observe("@B", &view(json!({ "type": "about", "name": "Bob" })));

    assert_eq!(agg.len(), 2);
    let mut names: Vec<_> = agg
      .into_snapshot()
      .into_iter()
      .filter_map(|p| p.name)
      .collect();
    names.sort();
    assert_eq!(names, ["Alice", "Bob"]);
  }
}
