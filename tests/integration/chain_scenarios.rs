use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use tracechain::chain::{IntegrityFailure, RecordChain};
use tracechain::record::{Quality, Stage};

use super::payload;

#[test]
fn subject_history_after_three_stages() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut chain = RecordChain::with_genesis_time(1, start);
    assert_eq!(chain.len(), 1);

    for (offset, stage) in [Stage::Farm, Stage::Harvest, Stage::Roasting]
        .into_iter()
        .enumerate()
    {
        chain.append_at(
            payload("CR001", stage, Quality::Premium),
            start + Duration::days(offset as i64 + 1),
        );
    }

    let history = chain.history("CR001");
    let stages: Vec<Stage> = history.iter().map(|r| r.payload.stage).collect();
    assert_eq!(stages, vec![Stage::Farm, Stage::Harvest, Stage::Roasting]);
    assert_eq!(chain.stats().total_subjects, 1);
    assert!(chain.is_valid());
}

#[test]
fn history_sorts_by_creation_time() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
    let mut chain = RecordChain::with_genesis_time(0, start);
    chain.append_at(
        payload("CR002", Stage::Roasting, Quality::GradeA),
        start + Duration::days(5),
    );
    chain.append_at(
        payload("CR002", Stage::Farm, Quality::GradeA),
        start + Duration::days(1),
    );

    let history = chain.history("CR002");
    assert_eq!(history[0].payload.stage, Stage::Farm);
    assert_eq!(history[1].payload.stage, Stage::Roasting);
    assert!(chain.history("CR999").is_empty());
}

#[test]
fn append_links_to_previous_latest() {
    let mut chain = RecordChain::new(2);
    let before = chain.latest().clone();
    let appended = chain
        .append(payload("CR010", Stage::Farm, Quality::Standard))
        .clone();

    assert_eq!(chain.len(), 2);
    assert_eq!(appended.sequence_index, 1);
    assert_eq!(appended.previous_digest, before.digest);
    assert_eq!(chain.genesis().previous_digest.as_str(), "0");
    assert_eq!(chain.stats().total_operators, 1);
}

#[test]
fn search_is_case_insensitive_and_ordered() {
    let mut chain = RecordChain::new(0);
    chain.append(payload("CR001", Stage::Farm, Quality::Premium));
    chain.append(payload("CR002", Stage::Harvest, Quality::GradeB));

    let hits = chain.search("  doi CHANG ");
    assert_eq!(hits.len(), 2);
    assert!(hits[0].sequence_index < hits[1].sequence_index);

    let all = chain.search("   ");
    assert_eq!(all.len(), chain.len());
    assert_eq!(chain.search("grade b").len(), 1);
}

#[test]
fn tampering_any_payload_field_invalidates_from_that_record() {
    let mut chain = RecordChain::new(1);
    for subject in ["CR001", "CR002", "CR003", "CR004"] {
        chain.append(payload(subject, Stage::Processing, Quality::GradeA));
    }
    let clean = chain.export_snapshot();

    let tampers: Vec<fn(&mut tracechain::record::Payload)> = vec![
        |p| p.location = "Elsewhere".to_string(),
        |p| p.operator = "Someone else".to_string(),
        |p| p.details.push('!'),
        |p| p.quality = Quality::Standard,
        |p| p.stage = Stage::Retail,
        |p| p.temperature = Some("30°C".to_string()),
        |p| p.is_automated = true,
    ];

    for tamper in tampers {
        let mut snapshot = clean.clone();
        tamper(&mut snapshot.records[2].payload);
        let replayed = RecordChain::from_snapshot(snapshot, 1).unwrap();

        let report = replayed.verify();
        let invalid = report.first_invalid.expect("tampered chain must fail");
        assert_eq!(invalid.index, 2);
        assert!(matches!(
            invalid.failure,
            IntegrityFailure::DigestMismatch { .. }
        ));
        assert!(!replayed.stats().is_valid);
    }
}

fn stage_strategy() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::PIPELINE.to_vec())
}

fn quality_strategy() -> impl Strategy<Value = Quality> {
    prop::sample::select(Quality::GRADES.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn chain_stays_valid_after_appends(
        difficulty in 0u8..=3,
        events in prop::collection::vec((1u32..50, stage_strategy(), quality_strategy()), 0..12),
    ) {
        let mut chain = RecordChain::new(difficulty);
        for (n, stage, quality) in &events {
            let subject = format!("CR{:03}", n);
            let previous = chain.latest().digest.clone();
            let record = chain.append(payload(&subject, *stage, *quality));
            prop_assert_eq!(&record.previous_digest, &previous);
            prop_assert!(record.digest.as_str().len() >= 8);
        }

        prop_assert_eq!(chain.len(), events.len() + 1);
        prop_assert!(chain.is_valid());

        let stats = chain.stats();
        prop_assert_eq!(stats.total_records, events.len() + 1);
        prop_assert!(stats.total_subjects <= events.len());
    }
}
