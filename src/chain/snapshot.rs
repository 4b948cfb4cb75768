//! Chain snapshots: JSON export and verbatim replay.

use super::{ChainStats, RecordChain};
use crate::error::{ChainError, StorageError};
use crate::record::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Snapshot layout version written by this crate.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Exported chain state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainSnapshot {
    pub records: Vec<Record>,
    pub stats: ChainStats,
    pub exported_at: DateTime<Utc>,
    pub format_version: String,
}

impl ChainSnapshot {
    pub fn to_json_pretty(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty JSON, creating parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), StorageError> {
        if path.as_os_str().is_empty() {
            return Err(StorageError::InvalidPath("empty snapshot path".to_string()));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json_pretty()?)?;
        info!(path = %path.display(), records = self.records.len(), "Snapshot written");
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self, StorageError> {
        if !path.is_file() {
            return Err(StorageError::InvalidPath(format!(
                "snapshot not found: {}",
                path.display()
            )));
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl RecordChain {
    pub fn export_snapshot(&self) -> ChainSnapshot {
        self.export_snapshot_at(Utc::now())
    }

    pub fn export_snapshot_at(&self, exported_at: DateTime<Utc>) -> ChainSnapshot {
        ChainSnapshot {
            records: self.records().to_vec(),
            stats: self.stats(),
            exported_at,
            format_version: FORMAT_VERSION.to_string(),
        }
    }

    /// Replay a snapshot.
    ///
    /// Records are taken verbatim, never re-sealed, so a tampered snapshot
    /// loads and then fails verification.
    pub fn from_snapshot(snapshot: ChainSnapshot, difficulty: u8) -> Result<Self, ChainError> {
        if snapshot.format_version != FORMAT_VERSION {
            return Err(ChainError::UnsupportedFormat(snapshot.format_version));
        }
        RecordChain::from_records(snapshot.records, difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Payload, Quality, Stage};
    use crate::types::SubjectId;
    use tempfile::TempDir;

    fn populated_chain() -> RecordChain {
        let mut chain = RecordChain::new(1);
        for (subject, stage) in [
            ("CR001", Stage::Farm),
            ("CR002", Stage::Farm),
            ("CR001", Stage::Harvest),
        ] {
            chain.append(Payload {
                subject_id: SubjectId::new(subject),
                stage,
                location: "Mae Suai, Chiang Rai".to_string(),
                operator: "Hill Tribe Growers".to_string(),
                details: "hand picked".to_string(),
                quality: Quality::Standard,
                batch_size: None,
                temperature: Some("21°C".to_string()),
                humidity: None,
                is_automated: false,
            });
        }
        chain
    }

    #[test]
    fn test_snapshot_replay_preserves_chain() {
        let chain = populated_chain();
        let snapshot = chain.export_snapshot();
        assert_eq!(snapshot.format_version, FORMAT_VERSION);
        assert_eq!(snapshot.stats.total_records, 4);

        let json = snapshot.to_json_pretty().unwrap();
        let restored = RecordChain::from_snapshot(ChainSnapshot::from_json(&json).unwrap(), 1)
            .unwrap();

        assert_eq!(restored.records(), chain.records());
        assert!(restored.is_valid());
        assert_eq!(restored.stats(), chain.stats());
        assert_eq!(restored.history("CR001").len(), 2);
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let json = populated_chain().export_snapshot().to_json_pretty().unwrap();
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"formatVersion\": \"1.0.0\""));
        assert!(json.contains("\"totalRecords\""));
    }

    #[test]
    fn test_tampered_snapshot_loads_but_fails_verification() {
        let mut snapshot = populated_chain().export_snapshot();
        snapshot.records[2].payload.location = "Elsewhere".to_string();

        let restored = RecordChain::from_snapshot(snapshot, 1).unwrap();
        let report = restored.verify();
        assert_eq!(report.first_invalid.map(|i| i.index), Some(2));
    }

    #[test]
    fn test_rejects_empty_and_unknown_version() {
        let mut snapshot = populated_chain().export_snapshot();
        snapshot.format_version = "2.0.0".to_string();
        assert!(matches!(
            RecordChain::from_snapshot(snapshot.clone(), 1),
            Err(ChainError::UnsupportedFormat(v)) if v == "2.0.0"
        ));

        snapshot.format_version = FORMAT_VERSION.to_string();
        snapshot.records.clear();
        assert!(matches!(
            RecordChain::from_snapshot(snapshot, 1),
            Err(ChainError::EmptySnapshot)
        ));
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exports").join("chain.json");
        let snapshot = populated_chain().export_snapshot();

        snapshot.write_to(&path).unwrap();
        let loaded = ChainSnapshot::read_from(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let missing = ChainSnapshot::read_from(&dir.path().join("absent.json"));
        assert!(matches!(missing, Err(StorageError::InvalidPath(_))));
    }
}
