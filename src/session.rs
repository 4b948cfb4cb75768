//! Session
//!
//! Owns one shared chain together with the insight engine, the sample
//! generator and the auto-updater that operate on it. There is no global
//! chain: callers hold a `Session` and pass it where needed.

use crate::chain::{ChainSnapshot, RecordChain, SharedChain};
use crate::config::TraceConfig;
use crate::error::ApiError;
use crate::feed::{AutoUpdater, SampleGenerator};
use crate::insight::{AnalysisReport, InsightEngine, Metrics};
use crate::record::{validate_payload, PayloadDraft, Record};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

pub struct Session {
    config: TraceConfig,
    chain: SharedChain,
    engine: InsightEngine,
    generator: Arc<Mutex<SampleGenerator>>,
    updater: AutoUpdater,
}

impl Session {
    pub fn new(config: TraceConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let chain = SharedChain::new(RecordChain::new(config.chain.difficulty));
        let engine = InsightEngine::new(config.insight.clone())?;
        let generator = Arc::new(Mutex::new(SampleGenerator::new(config.feed.seed)));
        let updater = AutoUpdater::new(chain.clone(), Arc::clone(&generator));

        info!(difficulty = config.chain.difficulty, "Session created");
        Ok(Self {
            config,
            chain,
            engine,
            generator,
            updater,
        })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn chain(&self) -> &SharedChain {
        &self.chain
    }

    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }

    pub fn updater(&self) -> &AutoUpdater {
        &self.updater
    }

    /// Validate a draft and append it.
    pub fn add_record(&self, draft: &PayloadDraft) -> Result<Record, ApiError> {
        let payload = validate_payload(draft)?;
        Ok(self.chain.append(payload))
    }

    /// Validate a draft and append it with an explicit creation time.
    pub fn add_record_at(
        &self,
        draft: &PayloadDraft,
        created_at: DateTime<Utc>,
    ) -> Result<Record, ApiError> {
        let payload = validate_payload(draft)?;
        Ok(self.chain.append_at(payload, created_at))
    }

    /// Append `count` generated demo events (oldest first). Returns the number appended.
    pub fn load_sample_data(&self, count: usize) -> Result<usize, ApiError> {
        let events = self.generator.lock().generate_sample_data(count, Utc::now());
        for event in &events {
            self.add_record_at(&event.draft, event.created_at)?;
        }
        info!(count = events.len(), "Sample data loaded");
        Ok(events.len())
    }

    /// Start the automated feed with the configured delay and interval.
    pub fn start_auto_update(&self) -> Result<bool, ApiError> {
        self.updater
            .start_after(self.config.feed.start_delay(), self.config.feed.interval())
    }

    pub fn stop_auto_update(&self) -> bool {
        self.updater.stop()
    }

    /// Replace the chain with a fresh genesis-only chain.
    pub fn reset(&self) {
        let previous = self
            .chain
            .replace(RecordChain::new(self.config.chain.difficulty));
        info!(discarded = previous.len(), "Chain reset");
    }

    /// Replace the chain with one replayed from `snapshot`.
    pub fn load_snapshot(&self, snapshot: ChainSnapshot) -> Result<(), ApiError> {
        let chain = RecordChain::from_snapshot(snapshot, self.config.chain.difficulty)?;
        let records = chain.len();
        self.chain.replace(chain);
        info!(records, "Snapshot loaded");
        Ok(())
    }

    pub fn metrics(&self) -> Metrics {
        self.engine.compute_shared(&self.chain)
    }

    pub fn report(&self) -> AnalysisReport {
        self.chain.read(|chain| self.engine.export_report(chain))
    }
}
