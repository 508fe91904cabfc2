//! The `FeedStore` trait — the persistence seam the ingestion pipeline
//! drives.
//!
//! The trait is implemented by storage backends (e.g.
//! `silo-store-sqlite`). The pipeline depends on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{author::AuthorProfile, message::Message};

/// Abstraction over a feed-log store backend.
///
/// Writes are batch-oriented: the pipeline hands over whole batches and
/// the backend commits each one atomically, all-or-nothing. The
/// pipeline never issues a second write while one is in flight, so
/// store-visible message order equals the order batches arrive in.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait FeedStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist one batch of messages in a single atomic transaction,
  /// preserving the batch's order. An empty batch is a no-op.
  fn append_messages(
    &self,
    batch: Vec<Message>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist the end-of-run author snapshot in a single transaction.
  fn put_authors(
    &self,
    profiles: Vec<AuthorProfile>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Total number of message rows committed so far.
  fn message_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Every committed message, in commit order.
  fn list_messages(
    &self,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;

  /// Look up one author profile. Returns `None` if no snapshot row
  /// exists for `key`.
  fn get_author<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<AuthorProfile>, Self::Error>> + Send + 'a;

  /// Number of author rows written by the snapshot.
  fn author_count(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
