//! `silo` — ingest an append-only feed log into SQLite.
//!
//! Reads a newline-delimited JSON log of feed messages, commits every
//! message to a `messages` table in fixed-size transactions, and
//! derives per-author profile metadata from "about" messages observed
//! during the same pass.
//!
//! # Usage
//!
//! ```
//! silo log.jsonl --db ssb.db --batch-size 1024
//! silo log.jsonl --in-memory
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use silo_ingest::{Pipeline, source::LineSource};
use silo_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "silo", about = "Ingest an append-only feed log into SQLite")]
struct Args {
  /// Path to the newline-delimited JSON feed log.
  #[arg(default_value = "log.jsonl", env = "SILO_LOG")]
  log: PathBuf,

  /// Path of the SQLite database to create.
  #[arg(long, default_value = "ssb.db", env = "SILO_DB")]
  db: PathBuf,

  /// Ingest into a throwaway in-memory database instead of a file.
  #[arg(long, env = "SILO_IN_MEMORY")]
  in_memory: bool,

  /// Messages per transaction.
  #[arg(
    long,
    env = "SILO_BATCH_SIZE",
    default_value_t = silo_ingest::DEFAULT_BATCH_SIZE as u64,
    value_parser = clap::value_parser!(u64).range(1..)
  )]
  batch_size: u64,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  let store = if args.in_memory {
    tracing::info!("using an in-memory database");
    SqliteStore::open_in_memory()
      .await
      .context("opening in-memory store")?
  } else {
    // The pipeline never cleans up a partially-ingested store, so each
    // run starts from a fresh database file.
    remove_stale_database(&args.db)?;
    tracing::info!(db = %args.db.display(), "opening database");
    SqliteStore::open(&args.db)
      .await
      .with_context(|| format!("opening store at {}", args.db.display()))?
  };

  let source = LineSource::open(&args.log)
    .await
    .with_context(|| format!("opening log {}", args.log.display()))?;

  let report = Pipeline::new(&store)
    .with_batch_size(args.batch_size as usize)
    .run(source)
    .await
    .context("ingestion failed")?;

  tracing::info!(
    messages = report.messages,
    flushes = report.flushes,
    authors = report.authors,
    "done"
  );

  Ok(())
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// Delete a previous run's database file and its SQLite siblings.
/// A missing file is not an error.
fn remove_stale_database(db: &Path) -> anyhow::Result<()> {
  for path in [
    db.to_path_buf(),
    sibling(db, "-journal"),
    sibling(db, "-wal"),
    sibling(db, "-shm"),
  ] {
    match std::fs::remove_file(&path) {
      Ok(()) => {
        tracing::debug!(path = %path.display(), "removed stale database file");
      }
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
      Err(e) => {
        return Err(e)
          .with_context(|| format!("removing {}", path.display()));
      }
    }
  }
  Ok(())
}

/// `ssb.db` → `ssb.db-journal` and friends.
fn sibling(db: &Path, suffix: &str) -> PathBuf {
  let mut name = db.as_os_str().to_owned();
  name.push(suffix);
  PathBuf::from(name)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
