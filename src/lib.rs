//! Lemmata: accent-insensitive sentence search over a pre-tokenized Greek corpus.

pub mod config;
pub mod corpus;
pub mod error;
pub mod metadata;
pub mod metrics;
pub mod search;
pub mod server;
pub mod startup;
pub mod types;
