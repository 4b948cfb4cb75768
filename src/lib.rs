//! Tracechain: Hash-Linked Supply-Chain Ledger
//!
//! An append-only chain of provenance records, each sealed with a digest that
//! covers its predecessor, plus an insight engine that derives bounded scores,
//! advice and trends from the chain's contents.

pub mod chain;
pub mod config;
pub mod error;
pub mod feed;
pub mod insight;
pub mod logging;
pub mod record;
pub mod session;
pub mod tooling;
pub mod types;
