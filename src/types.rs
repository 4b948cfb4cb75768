//! Core identifier types for the record chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Digest: rendered fingerprint of a record (lowercase hex, at least 8 chars)
///
/// Stored verbatim so that exported snapshots round-trip exactly, even when a
/// tampered or foreign snapshot carries a malformed value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Parent digest carried by the genesis record.
    pub const GENESIS_PARENT: &'static str = "0";

    pub fn new(value: impl Into<String>) -> Self {
        Digest(value.into())
    }

    pub fn genesis_parent() -> Self {
        Digest(Self::GENESIS_PARENT.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the first `width` characters are all `0`.
    ///
    /// A width of zero always matches.
    pub fn has_zero_prefix(&self, width: usize) -> bool {
        self.0.len() >= width && self.0.chars().take(width).all(|c| c == '0')
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// SubjectId: identifier of a tracked lot (`CR` + 3-6 digits, or `GENESIS`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub const GENESIS: &'static str = "GENESIS";
    const PREFIX: &'static str = "CR";

    /// Wrap a raw identifier without checking its format.
    ///
    /// Used for lookups and for records loaded from snapshots; new payloads go
    /// through [`SubjectId::parse`].
    pub fn new(value: impl Into<String>) -> Self {
        SubjectId(value.into())
    }

    pub fn genesis() -> Self {
        SubjectId(Self::GENESIS.to_string())
    }

    /// Parse a lot identifier, accepting only `CR` followed by 3 to 6 digits.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix(Self::PREFIX)?;
        if (3..=6).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(SubjectId(trimmed.to_string()))
        } else {
            None
        }
    }

    /// Derive a fresh lot identifier from the last six digits of the epoch
    /// milliseconds of `now`.
    pub fn generate(now: DateTime<Utc>) -> Self {
        let millis = now.timestamp_millis().unsigned_abs() % 1_000_000;
        SubjectId(format!("{}{:06}", Self::PREFIX, millis))
    }

    pub fn is_genesis(&self) -> bool {
        self.0 == Self::GENESIS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SubjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
