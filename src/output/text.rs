//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One status line per product in display order
//! - The summary line and the companion tool link

use crate::domain::{ComparisonResult, Status};
use crate::notify::card::summary_text;
use crate::orchestrator::RunOutcome;
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

const RULE_WIDTH: usize = 60;

/// Text formatter for human-readable output
pub struct TextFormatter {
    verbosity: Verbosity,
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    fn paint(&self, text: &str, status: Status) -> String {
        if !self.color {
            return text.to_string();
        }
        match status {
            Status::Error => text.red().to_string(),
            Status::New => text.cyan().to_string(),
            Status::Same => text.green().to_string(),
            Status::Upgrade => text.yellow().bold().to_string(),
            Status::Downgrade => text.magenta().bold().to_string(),
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format the status line of one product
    pub fn format_result(&self, result: &ComparisonResult) -> String {
        let name = self.bold(&result.name);
        let latest = result.latest_or_error();
        let baseline = result.baseline_version.as_deref().unwrap_or("-");

        let detail = match result.status {
            Status::Error => self.paint(latest, Status::Error),
            Status::New => format!("{} {}", latest, self.paint("(new)", Status::New)),
            Status::Same => latest.to_string(),
            Status::Upgrade => format!(
                "{} → {} {}",
                baseline,
                latest,
                self.paint("(update available)", Status::Upgrade)
            ),
            Status::Downgrade => format!(
                "{} → {} {}",
                baseline,
                latest,
                self.paint("(downgrade detected)", Status::Downgrade)
            ),
        };

        let mut line = format!("{} {}: {}", result.status.glyph(), name, detail);
        if self.verbosity == Verbosity::Verbose {
            if let Some(ref date) = result.release_date {
                line.push_str(&format!(" [released {}]", date));
            }
        }
        line
    }

    fn rule(&self) -> String {
        "=".repeat(RULE_WIDTH)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = summary_text(&outcome.report);

        if self.verbosity == Verbosity::Quiet {
            writeln!(writer, "{}", summary)?;
            return Ok(());
        }

        writeln!(writer, "{}", self.rule())?;
        writeln!(
            writer,
            "Emulator version check - {}",
            outcome.checked_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(writer, "{}", self.rule())?;
        writeln!(writer)?;

        if outcome.report.results.is_empty() {
            writeln!(writer, "No products checked.")?;
        }
        for result in &outcome.report.results {
            writeln!(writer, "{}", self.format_result(result))?;
        }

        writeln!(writer)?;
        writeln!(writer, "{}", summary)?;
        if let Some(ref link) = outcome.deep_link {
            writeln!(writer, "Version tool: {}", link)?;
        }

        if self.verbosity == Verbosity::Verbose {
            let errors = outcome.report.error_count();
            if errors > 0 {
                writeln!(writer, "{} product(s) could not be checked", errors)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_display_order, Baseline, ComparisonReport, VersionRecord};
    use crate::notify::MessageCard;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn outcome(records: Vec<VersionRecord>, baseline: &[(&str, &str)]) -> RunOutcome {
        let records: BTreeMap<_, _> = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        let report = ComparisonReport::build(
            &records,
            &Baseline::from_versions(baseline.iter().copied()),
            &default_display_order(),
        );
        let checked_at = NaiveDate::from_ymd_opt(2026, 1, 5)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let card = MessageCard::build(&report, None, checked_at);
        RunOutcome {
            checked_at,
            report,
            deep_link: None,
            card,
        }
    }

    fn render(formatter: &TextFormatter, outcome: &RunOutcome) -> String {
        let mut buf = Vec::new();
        formatter.format(outcome, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_status_lines() {
        let outcome = outcome(
            vec![
                VersionRecord::resolved("NoxPlayer", "7.0.6.2"),
                VersionRecord::resolved("MEmu", "9.3.1"),
                VersionRecord::resolved("LDPlayer9", "9.1.85.0"),
                VersionRecord::resolved("BlueStacks5", "5.21.650.1063"),
                VersionRecord::failed("MuMuPlayer", "version not found"),
            ],
            &[
                ("MEmu", "9.3.0"),
                ("LDPlayer9", "9.2.0"),
                ("BlueStacks5", "5.21.650.1063"),
            ],
        );
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let output = render(&formatter, &outcome);

        assert!(output.contains("🆕 NoxPlayer: 7.0.6.2 (new)"));
        assert!(output.contains("⬆️ MEmu: 9.3.0 → 9.3.1 (update available)"));
        assert!(output.contains("⬇️ LDPlayer9: 9.2.0 → 9.1.85.0 (downgrade detected)"));
        assert!(output.contains("✅ BlueStacks5: 5.21.650.1063"));
        assert!(output.contains("❌ MuMuPlayer: version not found"));
        assert!(output.contains("**🔔 ⬆️ 1 update(s), ⬇️ 1 downgrade(s) detected!**"));
        assert!(output.contains("Emulator version check - 2026-01-05 09:00:00"));
    }

    #[test]
    fn test_lines_follow_display_order() {
        let outcome = outcome(
            vec![
                VersionRecord::resolved("MuMuPlayer", "3.8.18"),
                VersionRecord::resolved("NoxPlayer", "7.0.6.2"),
            ],
            &[],
        );
        let output = render(&TextFormatter::with_color(Verbosity::Normal, false), &outcome);
        let nox = output.find("NoxPlayer").unwrap();
        let mumu = output.find("MuMuPlayer").unwrap();
        assert!(nox < mumu);
    }

    #[test]
    fn test_quiet_prints_summary_only() {
        let outcome = outcome(
            vec![VersionRecord::resolved("MEmu", "9.3.1")],
            &[("MEmu", "9.3.1")],
        );
        let output = render(&TextFormatter::with_color(Verbosity::Quiet, false), &outcome);
        assert_eq!(output, "✅ All emulators are up to date\n");
    }

    #[test]
    fn test_verbose_shows_release_date() {
        let outcome = outcome(
            vec![VersionRecord::resolved("MEmu", "9.3.1")
                .with_release_date(Some("2025-12-19".to_string()))],
            &[("MEmu", "9.3.1")],
        );
        let normal = render(&TextFormatter::with_color(Verbosity::Normal, false), &outcome);
        let verbose = render(&TextFormatter::with_color(Verbosity::Verbose, false), &outcome);
        assert!(!normal.contains("released"));
        assert!(verbose.contains("✅ MEmu: 9.3.1 [released 2025-12-19]"));
    }

    #[test]
    fn test_deep_link_is_printed() {
        let mut outcome = outcome(vec![VersionRecord::resolved("MEmu", "9.3.1")], &[]);
        outcome.deep_link = Some("https://tool.example.com/?MEmu_latest=9.3.1".to_string());
        let output = render(&TextFormatter::with_color(Verbosity::Normal, false), &outcome);
        assert!(output.contains("Version tool: https://tool.example.com/?MEmu_latest=9.3.1"));
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let outcome = outcome(
            vec![VersionRecord::resolved("MEmu", "9.3.1")],
            &[("MEmu", "9.3.0")],
        );
        let output = render(&TextFormatter::with_color(Verbosity::Normal, true), &outcome);
        assert!(output.contains("update available"));
    }
}
