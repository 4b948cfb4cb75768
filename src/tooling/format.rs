//! Format chain state and analysis reports as text.

use crate::chain::{ChainStats, ChainVerification};
use crate::insight::{AnalysisReport, ImpactCalculator, Metric, TrendDirection};
use crate::record::Record;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

fn short_digest(digest: &str) -> String {
    digest.chars().take(8).collect()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Records as a table, in the order given.
pub fn format_records_text(title: &str, records: &[Record]) -> String {
    let mut out = format!("{}\n\n", format_section_heading(title));
    if records.is_empty() {
        out.push_str("No records.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec![
        "#", "Created", "Subject", "Stage", "Quality", "Operator", "Location", "Digest",
    ]);
    for record in records {
        let payload = &record.payload;
        let stage = if payload.is_automated {
            format!("{} (auto)", payload.stage)
        } else {
            payload.stage.to_string()
        };
        table.add_row(vec![
            record.sequence_index.to_string(),
            record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            payload.subject_id.to_string(),
            stage,
            payload.quality.to_string(),
            payload.operator.clone(),
            payload.location.clone(),
            short_digest(record.digest.as_str()),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

pub fn format_stats_text(stats: &ChainStats) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Chain Statistics"));
    out.push_str(&format!("  Records:   {}\n", stats.total_records));
    out.push_str(&format!("  Subjects:  {}\n", stats.total_subjects));
    out.push_str(&format!("  Operators: {}\n", stats.total_operators));
    out.push_str(&format!("  Locations: {}\n", stats.total_locations));
    out.push_str(&format!("  Valid:     {}\n", yes_no(stats.is_valid)));
    out
}

pub fn format_verification_text(report: &ChainVerification) -> String {
    let mut out = format!("{}\n\n", format_section_heading("Integrity"));
    out.push_str(&format!("  Records checked: {}\n", report.checked));
    match &report.first_invalid {
        None => out.push_str(&format!("  Status: {}\n", "valid".green())),
        Some(invalid) => {
            out.push_str(&format!("  Status: {}\n", "INVALID".red().bold()));
            out.push_str(&format!("  First invalid record: #{}\n", invalid.index));
            out.push_str(&format!("  Reason: {}\n", invalid.failure));
        }
    }
    out
}

pub fn format_report_text(report: &AnalysisReport) -> String {
    let mut out = format_stats_text(&report.chain_stats);
    out.push('\n');

    out.push_str(&format!("{}\n\n", format_section_heading("Metrics")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Score", "Trend", "Change"]);
    for metric in Metric::ALL {
        let trend = match metric {
            Metric::Economic => report.trends.economic,
            Metric::Trust => report.trends.trust,
            Metric::Sustainability => report.trends.sustainability,
            Metric::Competitiveness => report.trends.competitiveness,
            Metric::FutureReadiness => report.trends.future_readiness,
            Metric::Ecosystem => report.trends.ecosystem,
        };
        let direction = match trend.trend {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Stable => "stable",
        };
        table.add_row(vec![
            metric.label().to_string(),
            report.metrics.get(metric).to_string(),
            direction.to_string(),
            format!("{:+}", trend.change),
        ]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str(&format!("  Overall score: {}\n\n", report.overall_score.bold()));

    out.push_str(&format!("{}\n\n", format_section_heading("Insights")));
    if report.insights.is_empty() {
        out.push_str("  None.\n");
    }
    for insight in &report.insights {
        out.push_str(&format!(
            "  [{:?}] {}: {}\n",
            insight.severity, insight.category, insight.message
        ));
    }
    out.push('\n');

    out.push_str(&format!("{}\n\n", format_section_heading("Recommendations")));
    if report.recommendations.is_empty() {
        out.push_str("  None.\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Priority", "Category", "Action", "Impact"]);
        for rec in &report.recommendations {
            table.add_row(vec![
                format!("{:?}", rec.priority).to_lowercase(),
                rec.category.clone(),
                rec.action.clone(),
                rec.impact.clone(),
            ]);
        }
        out.push_str(&format!("{}\n", table));
    }
    out.push('\n');

    out.push_str(&format!("{}\n\n", format_section_heading("Projected Impact")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Outcome", "Value"]);
    let outcomes = ImpactCalculator::outcomes(&report.chain_stats);
    for (label, value) in ImpactCalculator::formatted(&outcomes) {
        table.add_row(vec![label.to_string(), value]);
    }
    out.push_str(&format!("{}\n", table));
    out
}
