//! Core types and trait definitions for the silo feed-log store.
//!
//! This crate is deliberately free of I/O and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod author;
pub mod message;
pub mod store;
