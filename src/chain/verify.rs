//! Chain integrity verification.

use crate::record::Record;
use crate::types::Digest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a record failed verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum IntegrityFailure {
    /// Stored sequence index does not match the record's position.
    SequenceGap { expected: u64, found: u64 },
    /// Genesis does not carry the `"0"` parent digest.
    GenesisParent { found: Digest },
    /// Stored digest differs from the digest recomputed from the fields.
    DigestMismatch { stored: Digest, computed: Digest },
    /// Stored parent digest differs from the predecessor's digest.
    BrokenLink { expected: Digest, found: Digest },
}

impl fmt::Display for IntegrityFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityFailure::SequenceGap { expected, found } => {
                write!(f, "sequence index {} where {} was expected", found, expected)
            }
            IntegrityFailure::GenesisParent { found } => {
                write!(f, "genesis parent digest is '{}'", found)
            }
            IntegrityFailure::DigestMismatch { stored, computed } => {
                write!(f, "stored digest {} but fields hash to {}", stored, computed)
            }
            IntegrityFailure::BrokenLink { expected, found } => {
                write!(f, "previous digest {} does not match predecessor {}", found, expected)
            }
        }
    }
}

/// First failing record of a verification scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRecord {
    pub index: u64,
    pub failure: IntegrityFailure,
}

/// Result of a full chain scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainVerification {
    /// Number of records checked before the scan stopped.
    pub checked: usize,
    pub first_invalid: Option<InvalidRecord>,
}

impl ChainVerification {
    pub fn is_valid(&self) -> bool {
        self.first_invalid.is_none()
    }
}

/// Scan `records` from genesis, stopping at the first failure.
pub fn verify_records(records: &[Record]) -> ChainVerification {
    let mut checked = 0;
    for (position, record) in records.iter().enumerate() {
        checked += 1;
        let predecessor = position.checked_sub(1).map(|p| &records[p]);
        if let Some(failure) = check_record(position as u64, record, predecessor) {
            return ChainVerification {
                checked,
                first_invalid: Some(InvalidRecord {
                    index: position as u64,
                    failure,
                }),
            };
        }
    }
    ChainVerification {
        checked,
        first_invalid: None,
    }
}

fn check_record(
    position: u64,
    record: &Record,
    predecessor: Option<&Record>,
) -> Option<IntegrityFailure> {
    if record.sequence_index != position {
        return Some(IntegrityFailure::SequenceGap {
            expected: position,
            found: record.sequence_index,
        });
    }

    let computed = record.compute_digest();
    if computed != record.digest {
        return Some(IntegrityFailure::DigestMismatch {
            stored: record.digest.clone(),
            computed,
        });
    }

    match predecessor {
        None if record.previous_digest.as_str() != Digest::GENESIS_PARENT => {
            Some(IntegrityFailure::GenesisParent {
                found: record.previous_digest.clone(),
            })
        }
        Some(prev) if record.previous_digest != prev.digest => Some(IntegrityFailure::BrokenLink {
            expected: prev.digest.clone(),
            found: record.previous_digest.clone(),
        }),
        _ => None,
    }
}
