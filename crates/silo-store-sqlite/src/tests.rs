//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{DateTime, Utc};
use silo_core::{author::AuthorProfile, message::Message, store::FeedStore};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn ts(millis: i64) -> DateTime<Utc> {
  DateTime::from_timestamp_millis(millis).expect("in-range timestamp")
}

fn message(key: &str, author: &str) -> Message {
  Message {
    key:                key.to_owned(),
    previous_message:   None,
    author:             author.to_owned(),
    content:            r#"{"type":"post","text":"hi"}"#.to_owned(),
    timestamp_received: ts(1_439_392_020_612),
    timestamp_asserted: ts(1_439_392_010_000),
  }
}

// ─── Messages ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn append_and_count() {
  let s = store().await;

  s.append_messages(vec![message("%m1", "@A"), message("%m2", "@B")])
    .await
    .unwrap();

  assert_eq!(s.message_count().await.unwrap(), 2);
}

#[tokio::test]
async fn append_empty_batch_is_noop() {
  let s = store().await;
  s.append_messages(vec![]).await.unwrap();
  assert_eq!(s.message_count().await.unwrap(), 0);
}

#[tokio::test]
async fn commit_order_follows_batch_order() {
  let s = store().await;

  s.append_messages(vec![message("%m1", "@A"), message("%m2", "@A")])
    .await
    .unwrap();
  s.append_messages(vec![message("%m3", "@B")]).await.unwrap();

  let committed = s.list_messages().await.unwrap();
  let keys: Vec<_> = committed.iter().map(|m| m.key.as_str()).collect();
  assert_eq!(keys, ["%m1", "%m2", "%m3"]);
}

#[tokio::test]
async fn message_fields_survive_storage() {
  let s = store().await;

  let mut original = message("%m1", "@A");
  original.previous_message = Some("%m0".to_owned());
  s.append_messages(vec![original.clone()]).await.unwrap();

  let committed = s.list_messages().await.unwrap();
  assert_eq!(committed, [original]);
}

#[tokio::test]
async fn duplicate_keys_are_accepted() {
  // The log may repeat keys; the store must not reject them.
  let s = store().await;

  s.append_messages(vec![message("%dup", "@A"), message("%dup", "@A")])
    .await
    .unwrap();
  s.append_messages(vec![message("%dup", "@B")]).await.unwrap();

  assert_eq!(s.message_count().await.unwrap(), 3);
}

// ─── Authors ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn put_authors_and_get_author() {
  let s = store().await;

  s.put_authors(vec![
    AuthorProfile {
      key:         "@A".to_owned(),
      name:        Some("Alice".to_owned()),
      description: None,
      image:       Some("blob123".to_owned()),
    },
    AuthorProfile::new("@B"),
  ])
  .await
  .unwrap();

  let alice = s.get_author("@A").await.unwrap().unwrap();
  assert_eq!(alice.name.as_deref(), Some("Alice"));
  assert!(alice.description.is_none());
  assert_eq!(alice.image.as_deref(), Some("blob123"));

  // A profile with no fields still gets its row.
  let bob = s.get_author("@B").await.unwrap().unwrap();
  assert!(bob.name.is_none());

  assert_eq!(s.author_count().await.unwrap(), 2);
}

#[tokio::test]
async fn get_author_missing_returns_none() {
  let s = store().await;
  assert!(s.get_author("@nobody").await.unwrap().is_none());
}

// ─── Errors ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_in_missing_directory_is_a_database_error() {
  let err = SqliteStore::open("/definitely/missing/dir/feed.db")
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::Database(_)));
}
