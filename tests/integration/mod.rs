//! Integration tests for the tracechain ledger

mod auto_update;
mod chain_scenarios;
mod insight_defaults;
mod snapshot_replay;

use tracechain::record::{Payload, Quality, Stage};
use tracechain::types::SubjectId;

pub(crate) fn payload(subject: &str, stage: Stage, quality: Quality) -> Payload {
    Payload {
        subject_id: SubjectId::new(subject),
        stage,
        location: "Doi Chang, Chiang Rai".to_string(),
        operator: "Doi Chang Coffee Cooperative".to_string(),
        details: "Arabica cherries, hand picked".to_string(),
        quality,
        batch_size: Some("500kg".to_string()),
        temperature: None,
        humidity: None,
        is_automated: false,
    }
}
