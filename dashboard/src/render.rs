//! Plain-text rendering of a dashboard snapshot for the terminal front end

use chrono::Local;
use shared::ContractEvaluation;
use std::fmt::Write;

use crate::core::{ScorePoint, SortState, risk_distribution, score_points};
use crate::state::DashboardSnapshot;

const RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

/// Render the whole dashboard: header, error banner, stats, table, reasoning
pub fn render_dashboard(snapshot: &DashboardSnapshot, sort: &SortState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Contract Evaluation Dashboard");
    if let Some(at) = snapshot.last_activity() {
        let _ = writeln!(out, "Last updated: {}", at.with_timezone(&Local).format("%H:%M:%S"));
    }
    if snapshot.loading {
        let _ = writeln!(out, "Refreshing...");
    }
    if let Some(id) = &snapshot.analyzing_id {
        let _ = writeln!(out, "Analyzing {}...", id);
    }
    out.push_str(RULE);
    out.push('\n');

    if let Some(error) = &snapshot.error {
        let _ = writeln!(out, "! Error loading data: {}", error);
        out.push_str(RULE);
        out.push('\n');
    }

    if snapshot.is_initial_load() {
        let _ = writeln!(out, "Loading contract evaluations...");
        return out;
    }

    out.push_str(&render_summary(snapshot));
    out.push_str(&render_scores(&score_points(&snapshot.contracts)));
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&render_table(&snapshot.sorted(sort), sort));

    if let Some(selected) = &snapshot.selected {
        out.push_str(RULE);
        out.push('\n');
        out.push_str(&render_selection(selected));
    }

    out
}

pub fn render_summary(snapshot: &DashboardSnapshot) -> String {
    let summary = snapshot.summary();
    let mut out = format!(
        "Total: {}  Low: {}  Medium: {}  High: {}  Avg score: {:.1}\n",
        summary.total, summary.low_risk, summary.medium_risk, summary.high_risk, summary.average_score
    );

    let slices = risk_distribution(&snapshot.contracts);
    if !slices.is_empty() {
        let parts: Vec<String> = slices.iter().map(|s| format!("{} {}", s.name, s.value)).collect();
        let _ = writeln!(out, "Risk distribution: {}", parts.join(" | "));
    }
    out
}

/// One bar per vendor, 2 points per cell
pub fn render_scores(points: &[ScorePoint]) -> String {
    let mut out = String::new();
    for point in points {
        let cells = (point.score.clamp(0.0, 100.0) / 2.0).round() as usize;
        let _ = writeln!(
            out,
            "{:<24} {:<50} {:>5.1} {}",
            truncate(&point.name, 24),
            "█".repeat(cells),
            point.score,
            point.grade
        );
    }
    out
}

/// Table rows with display fallbacks applied
pub fn render_table(rows: &[&ContractEvaluation], sort: &SortState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:<12} {:>6} {:>5} {:<8} {:<12} {:<10}   (sorted by {} {:?})",
        "VENDOR", "CONTRACT", "SCORE", "GRADE", "RISK", "ACTION", "STATUS", sort.field, sort.direction
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<24} {:<12} {:>6.1} {:>5} {:<8} {:<12} {:<10}",
            truncate(row.display_vendor(), 24),
            truncate(&row.contract_id, 12),
            row.score(),
            row.grade(),
            row.risk().label(),
            row.recommendation(),
            row.status(),
        );
    }
    out
}

pub fn render_selection(selected: &ContractEvaluation) -> String {
    let mut out = format!("Selected: {} ({})\n", selected.display_vendor(), selected.contract_id);

    let Some(reasoning) = crate::core::ReasoningView::from_contract(selected) else {
        out.push_str("No reasoning chain yet\n");
        return out;
    };

    let _ = writeln!(out, "AI Reasoning Process");
    for (idx, step) in reasoning.steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", idx + 1, step);
    }
    if let Some(confidence) = &reasoning.confidence {
        let _ = writeln!(out, "Confidence: {}", confidence);
    }
    if let Some(justification) = &reasoning.justification {
        let _ = writeln!(out, "Justification: {}", justification);
    }
    if let Some(alternative) = &reasoning.alternative_consideration {
        let _ = writeln!(out, "Alternative: {}", alternative);
    }
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
