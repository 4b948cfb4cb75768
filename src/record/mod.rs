//! Records
//!
//! Immutable ledger entries. Each record carries one supply-chain event, the
//! digest of its predecessor, and its own digest sealed by a bounded
//! fit-seeking loop.

pub mod digest;
pub mod validation;

use crate::types::{Digest, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

pub use digest::{fingerprint, MAX_SEAL_ATTEMPTS, MAX_TARGET_WIDTH};
pub use validation::{validate_payload, PayloadDraft};

/// Pipeline stage of a supply-chain event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Farm,
    Harvest,
    Processing,
    Roasting,
    Packaging,
    Distribution,
    Retail,
    /// Reserved for the genesis record.
    System,
}

impl Stage {
    /// Business stages in pipeline order (excludes `System`).
    pub const PIPELINE: [Stage; 7] = [
        Stage::Farm,
        Stage::Harvest,
        Stage::Processing,
        Stage::Roasting,
        Stage::Packaging,
        Stage::Distribution,
        Stage::Retail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Farm => "farm",
            Stage::Harvest => "harvest",
            Stage::Processing => "processing",
            Stage::Roasting => "roasting",
            Stage::Packaging => "packaging",
            Stage::Distribution => "distribution",
            Stage::Retail => "retail",
            Stage::System => "system",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Stage::PIPELINE
            .iter()
            .chain(std::iter::once(&Stage::System))
            .find(|stage| stage.as_str() == lowered)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// Quality grade attached to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Premium,
    #[serde(rename = "Grade A")]
    GradeA,
    #[serde(rename = "Grade B")]
    GradeB,
    Standard,
    /// Reserved for the genesis record.
    #[serde(rename = "system")]
    System,
}

impl Quality {
    pub const GRADES: [Quality; 4] = [
        Quality::Premium,
        Quality::GradeA,
        Quality::GradeB,
        Quality::Standard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Premium => "Premium",
            Quality::GradeA => "Grade A",
            Quality::GradeB => "Grade B",
            Quality::Standard => "Standard",
            Quality::System => "system",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Quality::GRADES
            .iter()
            .chain(std::iter::once(&Quality::System))
            .find(|grade| grade.as_str().to_lowercase() == lowered)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// One supply-chain event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub subject_id: SubjectId,
    pub stage: Stage,
    pub location: String,
    pub operator: String,
    #[serde(default)]
    pub details: String,
    pub quality: Quality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<String>,
    #[serde(default)]
    pub is_automated: bool,
}

impl Payload {
    pub const GENESIS_LOCATION: &'static str = "Tracechain ledger network";
    pub const GENESIS_OPERATOR: &'static str = "System administrator";

    /// Sentinel payload of the genesis record.
    pub fn genesis() -> Self {
        Payload {
            subject_id: SubjectId::genesis(),
            stage: Stage::System,
            location: Self::GENESIS_LOCATION.to_string(),
            operator: Self::GENESIS_OPERATOR.to_string(),
            details: "Genesis record: supply-chain ledger initialised".to_string(),
            quality: Quality::System,
            batch_size: None,
            temperature: None,
            humidity: None,
            is_automated: false,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.subject_id.is_genesis()
    }

    /// True when both temperature and humidity readings are present.
    pub fn has_climate_readings(&self) -> bool {
        self.temperature.is_some() && self.humidity.is_some()
    }

    /// Case-insensitive substring match over the searchable text fields.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        [
            self.subject_id.as_str(),
            self.location.as_str(),
            self.operator.as_str(),
            self.details.as_str(),
            self.quality.as_str(),
            self.stage.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub sequence_index: u64,
    pub created_at: DateTime<Utc>,
    pub payload: Payload,
    pub previous_digest: Digest,
    pub digest: Digest,
    pub nonce: u64,
}

impl Record {
    /// Build and seal a record.
    ///
    /// Runs the fit-seeking loop: the nonce is incremented until the digest
    /// starts with `min(difficulty, 2)` zeros or `MAX_SEAL_ATTEMPTS` attempts
    /// were made. Exhaustion is not a failure; the last digest is kept.
    /// Returns the record and the number of attempts spent.
    pub fn seal(
        sequence_index: u64,
        created_at: DateTime<Utc>,
        payload: Payload,
        previous_digest: Digest,
        difficulty: u8,
    ) -> (Self, u32) {
        let mut record = Record {
            sequence_index,
            created_at,
            payload,
            previous_digest,
            digest: Digest::new(String::new()),
            nonce: 0,
        };
        record.digest = record.compute_digest();

        let width = usize::from(difficulty).min(MAX_TARGET_WIDTH);
        let mut attempts = 0;
        while !record.digest.has_zero_prefix(width) && attempts < MAX_SEAL_ATTEMPTS {
            record.nonce += 1;
            record.digest = record.compute_digest();
            attempts += 1;
        }

        debug!(
            index = record.sequence_index,
            digest = %record.digest,
            attempts,
            "Record sealed"
        );
        (record, attempts)
    }

    /// Sentinel first record of every chain.
    pub fn genesis(created_at: DateTime<Utc>) -> Self {
        let mut record = Record {
            sequence_index: 0,
            created_at,
            payload: Payload::genesis(),
            previous_digest: Digest::genesis_parent(),
            digest: Digest::new(String::new()),
            nonce: 0,
        };
        record.digest = record.compute_digest();
        record
    }

    /// Recompute the digest from the stored fields.
    pub fn compute_digest(&self) -> Digest {
        fingerprint(
            self.sequence_index,
            &self.created_at,
            &self.payload,
            &self.previous_digest,
            self.nonce,
        )
    }

    /// True when the stored digest matches the stored fields.
    pub fn digest_matches(&self) -> bool {
        self.compute_digest() == self.digest
    }

    pub fn is_genesis(&self) -> bool {
        self.payload.is_genesis()
    }
}
