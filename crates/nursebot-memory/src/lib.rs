//! # nursebot-memory
//!
//! Bounded per-user transcript storage. Callers hold an
//! `Arc<dyn TranscriptStore>` so the in-process map can be swapped for a
//! shared backend without touching the gateway.

pub mod store;

pub use store::{InMemoryStore, TranscriptStore};
