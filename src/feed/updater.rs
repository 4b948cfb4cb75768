//! Auto Updater
//!
//! Periodically appends one automated event to a shared chain from a tokio
//! task. Start and stop are idempotent. Each tick appends while holding the
//! run-state lock, and `stop` takes the same lock, so once `stop` returns no
//! append is in flight and none can begin.

use super::sample::SampleGenerator;
use crate::chain::SharedChain;
use crate::error::ApiError;
use crate::record::validate_payload;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

#[derive(Default)]
struct RunState {
    running: bool,
    /// Incremented on every start; a task only acts while its epoch is current.
    epoch: u64,
    interval: Option<Duration>,
    appended: u64,
    handle: Option<JoinHandle<()>>,
}

/// Periodic automated-event feed
pub struct AutoUpdater {
    chain: SharedChain,
    generator: Arc<Mutex<SampleGenerator>>,
    state: Arc<Mutex<RunState>>,
}

impl AutoUpdater {
    pub fn new(chain: SharedChain, generator: Arc<Mutex<SampleGenerator>>) -> Self {
        Self {
            chain,
            generator,
            state: Arc::new(Mutex::new(RunState::default())),
        }
    }

    /// Start appending every `interval`, first append one interval from now.
    ///
    /// Returns `Ok(false)` when already running.
    pub fn start(&self, interval: Duration) -> Result<bool, ApiError> {
        self.start_after(Duration::ZERO, interval)
    }

    /// Like [`AutoUpdater::start`], with the first append `delay + interval`
    /// from now.
    pub fn start_after(&self, delay: Duration, interval: Duration) -> Result<bool, ApiError> {
        if interval.is_zero() {
            return Err(ApiError::ConfigError(
                "auto-update interval must be positive".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|e| ApiError::Runtime(e.to_string()))?;

        let mut state = self.state.lock();
        if state.running {
            debug!("Auto-update already running");
            return Ok(false);
        }
        state.epoch += 1;
        state.running = true;
        state.interval = Some(interval);

        let task = UpdateTask {
            epoch: state.epoch,
            chain: self.chain.clone(),
            generator: Arc::clone(&self.generator),
            state: Arc::clone(&self.state),
        };
        state.handle = Some(runtime.spawn(task.run(delay, interval)));

        info!(
            interval_ms = interval.as_millis() as u64,
            delay_ms = delay.as_millis() as u64,
            "Auto-update started"
        );
        Ok(true)
    }

    /// Stop the feed. Returns `false` when it was not running.
    pub fn stop(&self) -> bool {
        let mut state = self.state.lock();
        if !state.running {
            return false;
        }
        state.running = false;
        state.interval = None;
        if let Some(handle) = state.handle.take() {
            handle.abort();
        }
        info!(appended = state.appended, "Auto-update stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    /// Interval of the current run, `None` when stopped.
    pub fn interval(&self) -> Option<Duration> {
        self.state.lock().interval
    }

    /// Records appended by the feed since construction.
    pub fn appended_count(&self) -> u64 {
        self.state.lock().appended
    }
}

impl Drop for AutoUpdater {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        state.running = false;
        if let Some(handle) = state.handle.take() {
            handle.abort();
        }
    }
}

struct UpdateTask {
    epoch: u64,
    chain: SharedChain,
    generator: Arc<Mutex<SampleGenerator>>,
    state: Arc<Mutex<RunState>>,
}

impl UpdateTask {
    async fn run(self, delay: Duration, interval: Duration) {
        let mut ticker = interval_at(Instant::now() + delay + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if !self.tick() {
                break;
            }
        }
        debug!(epoch = self.epoch, "Auto-update task exited");
    }

    /// Append one event. Returns `false` when this task should exit.
    fn tick(&self) -> bool {
        let mut state = self.state.lock();
        if !state.running || state.epoch != self.epoch {
            return false;
        }

        let draft = self.generator.lock().automated_draft();
        match validate_payload(&draft) {
            Ok(payload) => {
                let record = self.chain.append(payload);
                state.appended += 1;
                info!(
                    index = record.sequence_index,
                    subject = %record.payload.subject_id,
                    stage = %record.payload.stage,
                    "Automated record appended"
                );
            }
            Err(err) => warn!(error = %err, "Generated draft rejected"),
        }
        true
    }
}
