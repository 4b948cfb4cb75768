//! Chain Index
//!
//! Derived lookup structures over the record list: subject -> record
//! positions, plus the distinct operators and locations seen. These are caches
//! rebuilt from the records, never a source of truth.

use crate::record::{Payload, Record};
use crate::types::SubjectId;
use std::collections::{HashMap, HashSet};

/// Subject index: SubjectId -> positions in append order
pub struct ChainIndex {
    pub(crate) by_subject: HashMap<SubjectId, Vec<usize>>,
    /// Subjects in first-seen order
    subject_order: Vec<SubjectId>,
    operators: HashSet<String>,
    locations: HashSet<String>,
}

impl Default for ChainIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainIndex {
    pub fn new() -> Self {
        ChainIndex {
            by_subject: HashMap::new(),
            subject_order: Vec::new(),
            operators: HashSet::new(),
            locations: HashSet::new(),
        }
    }

    /// Build an index over every record after genesis.
    pub fn rebuild(records: &[Record]) -> Self {
        let mut index = ChainIndex::new();
        for (position, record) in records.iter().enumerate().skip(1) {
            index.insert(position, &record.payload);
        }
        index
    }

    /// Register the record stored at `position`. Genesis payloads are skipped.
    pub fn insert(&mut self, position: usize, payload: &Payload) {
        if payload.is_genesis() {
            return;
        }
        match self.by_subject.get_mut(&payload.subject_id) {
            Some(positions) => positions.push(position),
            None => {
                self.by_subject
                    .insert(payload.subject_id.clone(), vec![position]);
                self.subject_order.push(payload.subject_id.clone());
            }
        }
        self.operators.insert(payload.operator.clone());
        self.locations.insert(payload.location.clone());
    }

    /// Positions recorded for a subject, in append order.
    pub fn positions(&self, subject_id: &str) -> &[usize] {
        self.by_subject
            .get(subject_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Subjects in first-seen order.
    pub fn subject_ids(&self) -> &[SubjectId] {
        &self.subject_order
    }

    pub fn subject_count(&self) -> usize {
        self.by_subject.len()
    }

    pub fn operator_count(&self) -> usize {
        self.operators.len()
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Quality, Stage};

    fn payload(subject: &str, operator: &str, location: &str) -> Payload {
        Payload {
            subject_id: SubjectId::new(subject),
            stage: Stage::Farm,
            location: location.to_string(),
            operator: operator.to_string(),
            details: String::new(),
            quality: Quality::Standard,
            batch_size: None,
            temperature: None,
            humidity: None,
            is_automated: false,
        }
    }

    #[test]
    fn test_insert_groups_by_subject() {
        let mut index = ChainIndex::new();
        index.insert(1, &payload("CR001", "A", "X"));
        index.insert(2, &payload("CR002", "B", "X"));
        index.insert(3, &payload("CR001", "A", "Y"));

        assert_eq!(index.positions("CR001"), &[1, 3]);
        assert_eq!(index.positions("CR002"), &[2]);
        assert!(index.positions("CR999").is_empty());
        assert_eq!(index.subject_count(), 2);
        assert_eq!(index.operator_count(), 2);
        assert_eq!(index.location_count(), 2);
    }

    #[test]
    fn test_genesis_payload_is_never_indexed() {
        let mut index = ChainIndex::new();
        index.insert(1, &Payload::genesis());
        index.insert(2, &payload("CR001", "A", "X"));

        assert!(index.positions(SubjectId::GENESIS).is_empty());
        assert_eq!(index.subject_ids(), &[SubjectId::new("CR001")]);
        assert_eq!(index.subject_count(), 1);
        assert_eq!(index.operator_count(), 1);
        assert_eq!(index.location_count(), 1);
    }

    #[test]
    fn test_subject_ids_keep_first_seen_order() {
        let mut index = ChainIndex::new();
        index.insert(1, &payload("CR003", "A", "X"));
        index.insert(2, &payload("CR001", "A", "X"));
        index.insert(3, &payload("CR003", "A", "X"));

        let ids: Vec<&str> = index.subject_ids().iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["CR003", "CR001"]);
    }

    #[test]
    fn test_rebuild_skips_genesis() {
        let genesis = Record::genesis(chrono::Utc::now());
        let index = ChainIndex::rebuild(&[genesis]);
        assert_eq!(index.subject_count(), 0);
        assert_eq!(index.operator_count(), 0);
        assert!(index.positions("GENESIS").is_empty());
    }
}
