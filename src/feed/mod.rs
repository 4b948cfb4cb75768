//! Event feeds: demo sample data and the periodic automated feed.

pub mod sample;
pub mod updater;

pub use sample::{SampleEvent, SampleGenerator};
pub use updater::AutoUpdater;
