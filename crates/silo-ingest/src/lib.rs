//! The silo ingestion pipeline.
//!
//! Streams a newline-delimited JSON feed log, decodes each line into a
//! [`Message`](silo_core::message::Message), folds author profile
//! metadata out of "about" messages, and commits messages to a
//! [`FeedStore`](silo_core::store::FeedStore) in fixed-size atomic
//! batches. After the stream is exhausted the accumulated author
//! snapshot is written once.
//!
//! Everything runs on a single logical thread of control: the next
//! line is not read until the current one is accumulated, and no batch
//! is buffered while another is mid-commit. Memory is bounded by the
//! batch size.

pub mod aggregate;
pub mod batch;
pub mod decode;
pub mod error;
pub mod pipeline;
pub mod source;

pub use error::{DecodeError, IngestError};
pub use pipeline::{DEFAULT_BATCH_SIZE, IngestReport, Pipeline};
