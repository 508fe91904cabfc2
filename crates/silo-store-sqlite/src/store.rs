//! [`SqliteStore`] — the SQLite implementation of [`FeedStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use silo_core::{author::AuthorProfile, message::Message, store::FeedStore};

use crate::{
  encode::{encode_dt, RawMessage},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A feed-log store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone, Debug)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing and throwaway runs.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── FeedStore impl ──────────────────────────────────────────────────────────

impl FeedStore for SqliteStore {
  type Error = Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn append_messages(&self, batch: Vec<Message>) -> Result<()> {
    if batch.is_empty() {
      return Ok(());
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(
            "INSERT INTO messages (
               key, previous_message, author, content,
               timestamp_received, timestamp_asserted
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          )?;
          for message in &batch {
            stmt.execute(rusqlite::params![
              message.key,
              message.previous_message,
              message.author,
              message.content,
              encode_dt(message.timestamp_received),
              encode_dt(message.timestamp_asserted),
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn put_authors(&self, profiles: Vec<AuthorProfile>) -> Result<()> {
    if profiles.is_empty() {
      return Ok(());
    }

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(
            "INSERT INTO authors (key, name, description, image)
             VALUES (?1, ?2, ?3, ?4)",
          )?;
          for profile in &profiles {
            stmt.execute(rusqlite::params![
              profile.key,
              profile.name,
              profile.description,
              profile.image,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn message_count(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM messages", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn list_messages(&self) -> Result<Vec<Message>> {
    let raws: Vec<RawMessage> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT key, previous_message, author, content,
                  timestamp_received, timestamp_asserted
           FROM messages
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawMessage {
              key:                row.get(0)?,
              previous_message:   row.get(1)?,
              author:             row.get(2)?,
              content:            row.get(3)?,
              timestamp_received: row.get(4)?,
              timestamp_asserted: row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }

  async fn get_author(&self, key: &str) -> Result<Option<AuthorProfile>> {
    let key_str = key.to_owned();

    let profile: Option<AuthorProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT key, name, description, image
               FROM authors WHERE key = ?1",
              rusqlite::params![key_str],
              |row| {
                Ok(AuthorProfile {
                  key:         row.get(0)?,
                  name:        row.get(1)?,
                  description: row.get(2)?,
                  image:       row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(profile)
  }

  async fn author_count(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM authors", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }
}
