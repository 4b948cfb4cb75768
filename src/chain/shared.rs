//! Shared chain handle
//!
//! Wraps a [`RecordChain`] in an `Arc<RwLock<_>>` so the session, the insight
//! engine and the auto-updater can hold the same chain. An append and its index
//! updates happen under one write guard; readers never observe a record
//! without its index entries.

use super::{ChainSnapshot, ChainStats, ChainVerification, RecordChain};
use crate::error::ChainError;
use crate::record::{Payload, Record};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable handle to one chain
#[derive(Clone)]
pub struct SharedChain {
    inner: Arc<RwLock<RecordChain>>,
}

impl SharedChain {
    pub fn new(chain: RecordChain) -> Self {
        Self {
            inner: Arc::new(RwLock::new(chain)),
        }
    }

    /// Append and return a copy of the sealed record.
    pub fn append(&self, payload: Payload) -> Record {
        self.inner.write().append(payload).clone()
    }

    pub fn append_at(&self, payload: Payload, created_at: DateTime<Utc>) -> Record {
        self.inner.write().append_at(payload, created_at).clone()
    }

    pub fn try_append(
        &self,
        requested_index: u64,
        payload: Payload,
        created_at: DateTime<Utc>,
    ) -> Result<Record, ChainError> {
        self.inner
            .write()
            .try_append(requested_index, payload, created_at)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn latest(&self) -> Record {
        self.inner.read().latest().clone()
    }

    pub fn is_valid(&self) -> bool {
        self.inner.read().is_valid()
    }

    pub fn verify(&self) -> ChainVerification {
        self.inner.read().verify()
    }

    pub fn history(&self, subject_id: &str) -> Vec<Record> {
        self.inner
            .read()
            .history(subject_id)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search(&self, query: &str) -> Vec<Record> {
        self.inner
            .read()
            .search(query)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn stats(&self) -> ChainStats {
        self.inner.read().stats()
    }

    pub fn export_snapshot(&self) -> ChainSnapshot {
        self.inner.read().export_snapshot()
    }

    /// Run `f` against the chain under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&RecordChain) -> R) -> R {
        f(&self.inner.read())
    }

    /// Swap in a different chain, returning the previous one.
    pub fn replace(&self, chain: RecordChain) -> RecordChain {
        std::mem::replace(&mut *self.inner.write(), chain)
    }
}

impl From<RecordChain> for SharedChain {
    fn from(chain: RecordChain) -> Self {
        Self::new(chain)
    }
}
