//! SQL schema for the silo SQLite store.
//!
//! Executed once at connection startup. Future migrations will be
//! gated on `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `messages.key` deliberately carries no PRIMARY KEY or UNIQUE
/// constraint: the feed log may contain duplicate keys and broken
/// chains, and the store accepts them exactly as the log presents
/// them.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS messages (
    key                TEXT NOT NULL,
    previous_message   TEXT,            -- NULL for an author's first message
    author             TEXT NOT NULL,
    content            TEXT NOT NULL,   -- canonical JSON text of the payload
    timestamp_received TEXT NOT NULL,   -- RFC 3339 UTC; from the log envelope
    timestamp_asserted TEXT NOT NULL    -- RFC 3339 UTC; claimed by the payload
);

CREATE TABLE IF NOT EXISTS authors (
    key         TEXT NOT NULL,
    name        TEXT,
    description TEXT,
    image       TEXT
);

CREATE INDEX IF NOT EXISTS messages_author_idx ON messages(author);

PRAGMA user_version = 1;
";
