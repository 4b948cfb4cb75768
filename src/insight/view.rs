//! Read-only projection of a chain used by the scoring strategies.

use crate::chain::RecordChain;
use crate::record::Record;
use crate::types::SubjectId;
use std::collections::HashMap;

/// One subject's records in chronological order
pub struct SubjectHistory<'a> {
    pub subject_id: &'a SubjectId,
    pub records: Vec<&'a Record>,
}

impl SubjectHistory<'_> {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Snapshot of everything the strategies read, built once per computation
pub struct ChainView<'a> {
    /// Non-genesis records after position 0, in chain order.
    pub records: Vec<&'a Record>,
    /// Subject histories in first-seen order.
    pub histories: Vec<SubjectHistory<'a>>,
    pub operator_count: usize,
    pub location_count: usize,
    pub is_valid: bool,
    history_lens: HashMap<&'a str, usize>,
}

impl<'a> ChainView<'a> {
    pub fn new(chain: &'a RecordChain) -> Self {
        let records: Vec<&Record> = chain
            .records()
            .iter()
            .skip(1)
            .filter(|record| !record.is_genesis())
            .collect();
        let histories: Vec<SubjectHistory<'a>> = chain
            .subject_ids()
            .iter()
            .map(|subject_id| SubjectHistory {
                subject_id,
                records: chain.history(subject_id.as_str()),
            })
            .collect();
        let history_lens = histories
            .iter()
            .map(|h| (h.subject_id.as_str(), h.len()))
            .collect();
        let index = chain.index();

        ChainView {
            records,
            histories,
            operator_count: index.operator_count(),
            location_count: index.location_count(),
            is_valid: chain.is_valid(),
            history_lens,
        }
    }

    /// Number of records after genesis.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn subject_count(&self) -> usize {
        self.histories.len()
    }

    /// History length of a subject, zero when unknown.
    pub fn history_len(&self, subject_id: &str) -> usize {
        self.history_lens.get(subject_id).copied().unwrap_or(0)
    }
}
