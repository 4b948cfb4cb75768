//! CLI Interface
//!
//! Command definitions and execution for the `tracechain` binary. Commands
//! return their output as a string; the binary prints it.

use crate::chain::{ChainSnapshot, RecordChain};
use crate::config::{ConfigLoader, TraceConfig};
use crate::error::ApiError;
use crate::insight::InsightEngine;
use crate::record::Record;
use crate::session::Session;
use crate::tooling::format::{
    format_records_text, format_report_text, format_section_heading, format_stats_text,
    format_verification_text,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Tracechain CLI - hash-linked supply-chain ledger
#[derive(Parser)]
#[command(name = "tracechain")]
#[command(about = "Append-only supply-chain ledger with integrity checks and insight metrics")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for tracechain.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format shared by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a demo chain from generated events and show it
    Demo {
        /// Number of generated events (defaults to feed.sample_count)
        #[arg(long)]
        count: Option<usize>,
        /// RNG seed for reproducible events
        #[arg(long)]
        seed: Option<u64>,
        /// Keep the automated feed running for this many seconds
        #[arg(long)]
        watch: Option<u64>,
        /// Feed interval in milliseconds while watching (defaults to feed.interval_ms)
        #[arg(long)]
        interval_ms: Option<u64>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Build a demo chain and write it as a snapshot file
    Export {
        /// Destination file
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        count: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Verify the integrity of a snapshot
    Verify {
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the history of one subject
    History {
        snapshot: PathBuf,
        subject_id: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Search every record's text fields
    Search {
        snapshot: PathBuf,
        query: String,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show chain statistics
    Stats {
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Score the chain and show insights, trends and recommendations
    Insights {
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

/// CLI context for command execution
pub struct CliContext {
    config: TraceConfig,
}

impl CliContext {
    /// Load configuration from `config_path`, or from `workspace` and the environment.
    pub fn new(workspace: &Path, config_path: Option<&Path>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(workspace)?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: TraceConfig) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut TraceConfig {
        &mut self.config
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Demo {
                count,
                seed,
                watch,
                interval_ms,
                format,
            } => self.handle_demo(*count, *seed, *watch, *interval_ms, *format),
            Commands::Export { out, count, seed } => self.handle_export(out, *count, *seed),
            Commands::Verify { snapshot, format } => {
                let chain = self.load_chain(snapshot)?;
                let report = chain.verify();
                match format {
                    OutputFormat::Json => to_json(&report),
                    OutputFormat::Text => Ok(format_verification_text(&report)),
                }
            }
            Commands::History {
                snapshot,
                subject_id,
                format,
            } => {
                let chain = self.load_chain(snapshot)?;
                let history: Vec<Record> = chain.history(subject_id).into_iter().cloned().collect();
                match format {
                    OutputFormat::Json => to_json(&history),
                    OutputFormat::Text => Ok(format_records_text(
                        &format!("History of {}", subject_id),
                        &history,
                    )),
                }
            }
            Commands::Search {
                snapshot,
                query,
                format,
            } => {
                let chain = self.load_chain(snapshot)?;
                let hits: Vec<Record> = chain.search(query).into_iter().cloned().collect();
                match format {
                    OutputFormat::Json => to_json(&hits),
                    OutputFormat::Text => Ok(format_records_text(
                        &format!("{} match(es) for '{}'", hits.len(), query.trim()),
                        &hits,
                    )),
                }
            }
            Commands::Stats { snapshot, format } => {
                let stats = self.load_chain(snapshot)?.stats();
                match format {
                    OutputFormat::Json => to_json(&stats),
                    OutputFormat::Text => Ok(format_stats_text(&stats)),
                }
            }
            Commands::Insights { snapshot, format } => {
                let chain = self.load_chain(snapshot)?;
                let engine = InsightEngine::new(self.config.insight.clone())?;
                let report = engine.export_report(&chain);
                match format {
                    OutputFormat::Json => to_json(&report),
                    OutputFormat::Text => Ok(format_report_text(&report)),
                }
            }
        }
    }

    fn demo_session(&self, count: Option<usize>, seed: Option<u64>) -> Result<Session, ApiError> {
        let mut config = self.config.clone();
        if seed.is_some() {
            config.feed.seed = seed;
        }
        let session = Session::new(config)?;
        session.load_sample_data(count.unwrap_or(self.config.feed.sample_count))?;
        Ok(session)
    }

    fn handle_demo(
        &self,
        count: Option<usize>,
        seed: Option<u64>,
        watch: Option<u64>,
        interval_ms: Option<u64>,
        format: OutputFormat,
    ) -> Result<String, ApiError> {
        let mut config = self.config.clone();
        if let Some(ms) = interval_ms {
            config.feed.interval_ms = ms;
        }
        let session = CliContext::from_config(config)?.demo_session(count, seed)?;

        if let Some(secs) = watch {
            let runtime = tokio::runtime::Runtime::new()
                .map_err(|e| ApiError::Runtime(format!("Failed to start runtime: {}", e)))?;
            runtime.block_on(async {
                session.start_auto_update()?;
                tokio::time::sleep(Duration::from_secs(secs)).await;
                session.stop_auto_update();
                Ok::<(), ApiError>(())
            })?;
            info!(
                appended = session.updater().appended_count(),
                "Demo watch finished"
            );
        }

        let report = session.report();
        let recent: Vec<Record> = session
            .chain()
            .read(|chain| chain.recent_activity(10).into_iter().cloned().collect());

        match format {
            OutputFormat::Json => to_json(&json!({
                "report": report,
                "recentActivity": recent,
            })),
            OutputFormat::Text => {
                let mut out = format_records_text("Recent Activity", &recent);
                out.push('\n');
                out.push_str(&format_report_text(&report));
                Ok(out)
            }
        }
    }

    fn handle_export(
        &self,
        out: &Path,
        count: Option<usize>,
        seed: Option<u64>,
    ) -> Result<String, ApiError> {
        let session = self.demo_session(count, seed)?;
        let snapshot = session.chain().export_snapshot();
        snapshot.write_to(out)?;
        Ok(format!(
            "{}\n\n  Wrote {} records to {}\n",
            format_section_heading("Export"),
            snapshot.records.len(),
            out.display()
        ))
    }

    fn load_chain(&self, path: &Path) -> Result<RecordChain, ApiError> {
        let snapshot = ChainSnapshot::read_from(path)?;
        Ok(RecordChain::from_snapshot(
            snapshot,
            self.config.chain.difficulty,
        )?)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(crate::error::StorageError::Serialization(e)))
}
