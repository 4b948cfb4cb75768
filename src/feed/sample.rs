//! Demo data generation.

use crate::record::{PayloadDraft, Quality, Stage};
use chrono::{DateTime, Duration, DurationRound, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SUBJECTS: &[&str] = &["CR001", "CR002", "CR003", "CR004", "CR005"];

const LOCATIONS: &[&str] = &[
    "Doi Chang, Chiang Rai",
    "Mae Sai, Chiang Rai",
    "Chiang Saen, Chiang Rai",
    "Mae Chan, Chiang Rai",
    "Wiang Kaen, Chiang Rai",
    "Phan, Chiang Rai",
    "Thoeng, Chiang Rai",
];

const OPERATORS: &[&str] = &[
    "Somchai Jaidee",
    "Malee Suksai",
    "Boonmee Rakdee",
    "Mae Fah Luang Foundation",
    "Doi Chang Coffee Cooperative",
    "Chiang Rai Coffee Co.",
    "Mountain Coffee House",
    "Doi Tung Roastery",
];

const AUTOMATED_OPERATORS: &[&str] = &[
    "Smart AI Farm",
    "IoT Processing Centre",
    "Automated Roastery",
    "AI Inspection System",
];

const VARIETIES: &[&str] = &[
    "Arabica Caturra",
    "Arabica Typica",
    "Arabica Bourbon",
    "Arabica Kent",
];

const PROCESSES: &[&str] = &[
    "Washed Process",
    "Natural Process",
    "Honey Process",
    "Semi-Washed Process",
];

const ROASTS: &[&str] = &["Light Roast", "Medium Roast", "Medium-Dark Roast", "Dark Roast"];

const PACKAGING: &[&str] = &["valve bag", "zip bag", "tin", "paper bag"];

/// Stages eligible for automated capture.
const AUTOMATED_STAGES: usize = 5;

/// A draft with its creation time
#[derive(Debug, Clone)]
pub struct SampleEvent {
    pub created_at: DateTime<Utc>,
    pub draft: PayloadDraft,
}

/// Random supply-chain event generator
pub struct SampleGenerator {
    rng: StdRng,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SampleGenerator {
    /// Seeded generators produce the same sequence on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options.choose(&mut self.rng).copied().unwrap_or_default()
    }

    /// `count` manual events spread over the 30 days before `now`, oldest first.
    pub fn generate_sample_data(&mut self, count: usize, now: DateTime<Utc>) -> Vec<SampleEvent> {
        let mut events: Vec<SampleEvent> = (0..count)
            .map(|_| {
                let offset = Duration::days(self.rng.gen_range(0..30))
                    + Duration::hours(self.rng.gen_range(0..24))
                    + Duration::minutes(self.rng.gen_range(0..60));
                let created_at = now - offset;
                let created_at = created_at
                    .duration_trunc(Duration::minutes(1))
                    .unwrap_or(created_at);
                SampleEvent {
                    created_at,
                    draft: self.manual_draft(),
                }
            })
            .collect();
        events.sort_by_key(|event| event.created_at);
        events
    }

    fn manual_draft(&mut self) -> PayloadDraft {
        let stage = Stage::PIPELINE[self.rng.gen_range(0..Stage::PIPELINE.len())];
        let quality = Quality::GRADES[self.rng.gen_range(0..Quality::GRADES.len())];
        PayloadDraft {
            subject_id: self.pick(SUBJECTS).to_string(),
            stage: stage.to_string(),
            location: self.pick(LOCATIONS).to_string(),
            operator: self.pick(OPERATORS).to_string(),
            details: self.stage_details(stage),
            quality: quality.to_string(),
            batch_size: Some(format!("{} kg", self.rng.gen_range(50..250))),
            temperature: Some(format!("{}°C", self.rng.gen_range(20..35))),
            humidity: Some(format!("{}%", self.rng.gen_range(40..70))),
            is_automated: false,
        }
    }

    /// One automated event for the periodic feed: early stages only, Premium.
    pub fn automated_draft(&mut self) -> PayloadDraft {
        let stage = Stage::PIPELINE[self.rng.gen_range(0..AUTOMATED_STAGES)];
        PayloadDraft {
            subject_id: self.pick(SUBJECTS).to_string(),
            stage: stage.to_string(),
            location: self.pick(LOCATIONS).to_string(),
            operator: self.pick(AUTOMATED_OPERATORS).to_string(),
            details: format!(
                "Automated {} inspection with IoT sensors and machine learning",
                stage
            ),
            quality: Quality::Premium.to_string(),
            batch_size: Some(format!("{} kg", self.rng.gen_range(80..200))),
            temperature: Some(format!("{}°C", self.rng.gen_range(22..30))),
            humidity: Some(format!("{}%", self.rng.gen_range(45..65))),
            is_automated: true,
        }
    }

    fn stage_details(&mut self, stage: Stage) -> String {
        match stage {
            Stage::Farm => format!(
                "{} grown at altitude {} m on {} rai",
                self.pick(VARIETIES),
                self.rng.gen_range(1000..1500),
                self.rng.gen_range(5..25)
            ),
            Stage::Harvest => format!(
                "Hand picked, {}% ripe cherries, {} kg, moisture {}%",
                self.rng.gen_range(85..100),
                self.rng.gen_range(50..250),
                self.rng.gen_range(10..15)
            ),
            Stage::Processing => format!(
                "{} at {}°C, fermented {} hours",
                self.pick(PROCESSES),
                self.rng.gen_range(20..30),
                self.rng.gen_range(12..36)
            ),
            Stage::Roasting => format!(
                "{} at {}°C for {} minutes",
                self.pick(ROASTS),
                self.rng.gen_range(180..220),
                self.rng.gen_range(8..16)
            ),
            Stage::Packaging => format!(
                "Packed in {} of {} g",
                self.pick(PACKAGING),
                self.rng.gen_range(250..1000)
            ),
            Stage::Distribution => format!(
                "Shipped to {} outlets at {}°C over {} km",
                self.rng.gen_range(1..21),
                self.rng.gen_range(15..25),
                self.rng.gen_range(50..550)
            ),
            Stage::Retail => format!(
                "On shelf at {} THB per pack, {} packs in stock",
                self.rng.gen_range(150..500),
                self.rng.gen_range(10..60)
            ),
            Stage::System => String::new(),
        }
    }
}
