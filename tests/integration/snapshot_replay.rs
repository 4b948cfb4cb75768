use tempfile::TempDir;
use tracechain::chain::{ChainSnapshot, RecordChain, FORMAT_VERSION};
use tracechain::config::TraceConfig;
use tracechain::error::{ApiError, ChainError};
use tracechain::record::{Quality, Stage};
use tracechain::session::Session;

use super::payload;

#[test]
fn replayed_snapshot_keeps_every_field() {
    let mut config = TraceConfig::default();
    config.feed.seed = Some(3);
    let session = Session::new(config).unwrap();
    session.load_sample_data(15).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("chain.json");
    let snapshot = session.chain().export_snapshot();
    assert_eq!(snapshot.format_version, FORMAT_VERSION);
    snapshot.write_to(&path).unwrap();

    let loaded = ChainSnapshot::read_from(&path).unwrap();
    assert_eq!(loaded.records, snapshot.records);
    assert_eq!(loaded.stats, snapshot.stats);

    let replayed = RecordChain::from_snapshot(loaded, 1).unwrap();
    assert!(replayed.is_valid());
    assert_eq!(replayed.stats(), session.chain().stats());
    assert_eq!(replayed.subject_ids(), session.chain().read(|c| c.subject_ids().to_vec()).as_slice());
}

#[test]
fn replayed_chain_accepts_further_appends() {
    let mut chain = RecordChain::new(1);
    chain.append(payload("CR100", Stage::Farm, Quality::Premium));

    let mut replayed = RecordChain::from_snapshot(chain.export_snapshot(), 1).unwrap();
    replayed.append(payload("CR100", Stage::Harvest, Quality::Premium));
    assert_eq!(replayed.len(), 3);
    assert_eq!(replayed.history("CR100").len(), 2);
    assert!(replayed.is_valid());
}

#[test]
fn session_rejects_unknown_format_version() {
    let session = Session::new(TraceConfig::default()).unwrap();
    let mut snapshot = session.chain().export_snapshot();
    snapshot.format_version = "0.1".to_string();

    let err = session.load_snapshot(snapshot).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Chain(ChainError::UnsupportedFormat(_))
    ));
    assert_eq!(session.chain().len(), 1);
}
