//! Record Chain
//!
//! Append-only sequence of records starting at a genesis record. Every record
//! links to its predecessor's digest. Derived indices are updated on each
//! append so history and statistics lookups avoid full scans.

pub mod index;
pub mod shared;
pub mod snapshot;
pub mod verify;

use crate::error::ChainError;
use crate::record::{Payload, Quality, Record, Stage};
use crate::types::SubjectId;
use chrono::{DateTime, Utc};
use index::ChainIndex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use shared::SharedChain;
pub use snapshot::{ChainSnapshot, FORMAT_VERSION};
pub use verify::{ChainVerification, IntegrityFailure, InvalidRecord};

/// Default number of leading zero hex characters sought when sealing.
pub const DEFAULT_DIFFICULTY: u8 = 1;

/// Counts reported for dashboards and exports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainStats {
    /// All records, genesis included.
    pub total_records: usize,
    pub total_subjects: usize,
    pub total_operators: usize,
    pub total_locations: usize,
    pub is_valid: bool,
}

/// Append-only record chain
///
/// Always holds at least the genesis record.
pub struct RecordChain {
    records: Vec<Record>,
    index: ChainIndex,
    difficulty: u8,
}

impl Default for RecordChain {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl RecordChain {
    /// Create a chain holding a genesis record stamped now.
    pub fn new(difficulty: u8) -> Self {
        Self::with_genesis_time(difficulty, Utc::now())
    }

    pub fn with_genesis_time(difficulty: u8, created_at: DateTime<Utc>) -> Self {
        RecordChain {
            records: vec![Record::genesis(created_at)],
            index: ChainIndex::new(),
            difficulty,
        }
    }

    /// Assemble a chain from records loaded verbatim, rebuilding the indices.
    pub(crate) fn from_records(records: Vec<Record>, difficulty: u8) -> Result<Self, ChainError> {
        if records.is_empty() {
            return Err(ChainError::EmptySnapshot);
        }
        let index = ChainIndex::rebuild(&records);
        Ok(RecordChain {
            records,
            index,
            difficulty,
        })
    }

    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Number of records, genesis included.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Never true: a chain always holds its genesis record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn genesis(&self) -> &Record {
        &self.records[0]
    }

    pub fn latest(&self) -> &Record {
        &self.records[self.records.len() - 1]
    }

    pub fn get(&self, sequence_index: u64) -> Option<&Record> {
        usize::try_from(sequence_index)
            .ok()
            .and_then(|i| self.records.get(i))
    }

    /// Append a payload stamped with the current time.
    pub fn append(&mut self, payload: Payload) -> &Record {
        self.push_sealed(payload, Utc::now())
    }

    /// Append a payload with an explicit creation time.
    pub fn append_at(&mut self, payload: Payload, created_at: DateTime<Utc>) -> &Record {
        self.push_sealed(payload, created_at)
    }

    /// Append only if `requested_index` is the next sequence index.
    pub fn try_append(
        &mut self,
        requested_index: u64,
        payload: Payload,
        created_at: DateTime<Utc>,
    ) -> Result<&Record, ChainError> {
        let expected = self.records.len() as u64;
        if requested_index != expected {
            return Err(ChainError::IndexMismatch {
                requested: requested_index,
                expected,
            });
        }
        Ok(self.push_sealed(payload, created_at))
    }

    fn push_sealed(&mut self, payload: Payload, created_at: DateTime<Utc>) -> &Record {
        let position = self.records.len();
        let previous_digest = self.latest().digest.clone();
        let (record, attempts) = Record::seal(
            position as u64,
            created_at,
            payload,
            previous_digest,
            self.difficulty,
        );

        self.index.insert(position, &record.payload);
        info!(
            index = position,
            subject = %record.payload.subject_id,
            stage = %record.payload.stage,
            digest = %record.digest,
            attempts,
            "Record appended"
        );
        self.records.push(record);
        &self.records[position]
    }

    /// Full integrity scan from genesis.
    pub fn verify(&self) -> ChainVerification {
        let report = verify::verify_records(&self.records);
        if let Some(ref invalid) = report.first_invalid {
            warn!(
                index = invalid.index,
                failure = %invalid.failure,
                "Chain integrity check failed"
            );
        }
        report
    }

    pub fn is_valid(&self) -> bool {
        self.verify().is_valid()
    }

    /// Records for a subject in chronological order.
    ///
    /// Stable: records with equal timestamps keep append order.
    pub fn history(&self, subject_id: &str) -> Vec<&Record> {
        let mut history: Vec<&Record> = self
            .index
            .positions(subject_id)
            .iter()
            .map(|&p| &self.records[p])
            .collect();
        history.sort_by_key(|record| record.created_at);
        history
    }

    /// Case-insensitive substring search over the text fields of every record.
    ///
    /// A blank query returns the whole chain. Results keep chain order.
    pub fn search(&self, query: &str) -> Vec<&Record> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records
            .iter()
            .filter(|record| record.payload.matches_lowercase(&needle))
            .collect()
    }

    pub fn stats(&self) -> ChainStats {
        ChainStats {
            total_records: self.records.len(),
            total_subjects: self.index.subject_count(),
            total_operators: self.index.operator_count(),
            total_locations: self.index.location_count(),
            is_valid: self.is_valid(),
        }
    }

    pub fn records_by_stage(&self, stage: Stage) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.payload.stage == stage)
            .collect()
    }

    pub fn records_by_quality(&self, quality: Quality) -> Vec<&Record> {
        self.records
            .iter()
            .filter(|record| record.payload.quality == quality)
            .collect()
    }

    /// Last `count` records, newest first.
    pub fn recent_activity(&self, count: usize) -> Vec<&Record> {
        self.records.iter().rev().take(count).collect()
    }

    /// Distinct subjects (genesis excluded) in first-seen order.
    pub fn subject_ids(&self) -> &[SubjectId] {
        self.index.subject_ids()
    }

    pub(crate) fn index(&self) -> &ChainIndex {
        &self.index
    }
}
