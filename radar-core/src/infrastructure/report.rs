// radar-core/src/infrastructure/report.rs

use comfy_table::{Cell, Table, presets::ASCII_MARKDOWN};
use std::fmt::Write as _;
use std::path::Path;

use crate::domain::quality::QualityReport;
use crate::domain::series::Observation;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::{atomic_write, save_json};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Human-readable report: summary table, findings, then configuration warnings.
pub fn render_text(dataset_id: &str, report: &QualityReport) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_MARKDOWN);
    table.set_header(vec!["Check", "Issues"]);
    for (check, count) in report.summary() {
        table.add_row(vec![Cell::new(check), Cell::new(count)]);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Quality report: {}", dataset_id);
    let _ = writeln!(out, "{}", table);
    let _ = writeln!(out, "Removed: {}", report.removed);

    let findings = render_findings(report);
    if !findings.is_empty() {
        let _ = writeln!(out, "\nFindings:");
        for line in findings.lines() {
            let _ = writeln!(out, "  {}", line);
        }
    }
    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\nWarnings:");
        for w in &report.warnings {
            let _ = writeln!(out, "  - {}", w);
        }
    }
    out
}

/// One line per flagged item, grouped by check, chronological inside each group.
pub fn render_findings(report: &QualityReport) -> String {
    let mut out = String::new();
    for gap in &report.gaps {
        let _ = writeln!(
            out,
            "gap      {} -> {} ({} days)",
            gap.preceding.timestamp.format(DATE_FORMAT),
            gap.following.timestamp.format(DATE_FORMAT),
            gap.elapsed().num_days()
        );
    }
    for obs in &report.outliers {
        let _ = writeln!(out, "outlier  {}", describe(obs));
    }
    for obs in &report.range_violations {
        let _ = writeln!(out, "range    {}", describe(obs));
    }
    out
}

fn describe(obs: &Observation) -> String {
    format!("{} value={}", obs.timestamp.format(DATE_FORMAT), obs.value)
}

pub fn to_json(report: &QualityReport) -> Result<String, InfrastructureError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// JSON when `path` ends in `.json`, text otherwise. Written atomically.
pub fn save_report(dataset_id: &str, report: &QualityReport, path: &Path) -> Result<(), InfrastructureError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => save_json(path, report),
        _ => atomic_write(path, render_text(dataset_id, report)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::quality::{CheckKind, ConfigurationWarning, Gap};
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn obs(day: u32, value: f64) -> Observation {
        let t = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Observation::new("IPC", t, value)
    }

    fn sample() -> QualityReport {
        QualityReport {
            gaps: vec![Gap {
                preceding: obs(5, 12.0),
                following: obs(20, 13.0),
            }],
            outliers: vec![obs(6, 100.0)],
            range_violations: vec![obs(2, -1.5)],
            warnings: vec![ConfigurationWarning::notice(
                CheckKind::Continuity,
                "both max_gap_days (10) and max_gap_months (1) are set; using max_gap_days",
            )],
            removed: 2,
        }
    }

    #[test]
    fn test_findings_snapshot() {
        insta::assert_snapshot!(render_findings(&sample()), @r"
        gap      2024-01-05 -> 2024-01-20 (15 days)
        outlier  2024-01-06 value=100
        range    2024-01-02 value=-1.5
        ");
    }

    #[test]
    fn test_render_text_sections() {
        let text = render_text("indec_ipc", &sample());
        assert!(text.starts_with("Quality report: indec_ipc\n"));
        assert!(text.contains("| Check"));
        assert!(text.contains("range_violations"));
        assert!(text.contains("Removed: 2"));
        assert!(text.contains("Findings:"));
        assert!(text.contains("Warnings:\n  - [continuity] both max_gap_days"));
    }

    #[test]
    fn test_clean_report_has_no_findings_section() {
        let text = render_text("x", &QualityReport::default());
        assert!(!text.contains("Findings:"));
        assert!(!text.contains("Warnings:"));
    }

    #[test]
    fn test_save_report_json_roundtrip() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("ipc.report.json");
        save_report("ipc", &sample(), &path)?;

        let back: QualityReport = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(back, sample());

        let txt = dir.path().join("ipc.report.txt");
        save_report("ipc", &sample(), &txt)?;
        assert!(std::fs::read_to_string(txt)?.contains("Quality report: ipc"));
        Ok(())
    }
}
