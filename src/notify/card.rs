//! Status card rendering
//!
//! This module provides:
//! - The Markdown status table in display order
//! - The summary line and theme colour derived from aggregate counts
//! - The MessageCard payload posted to the webhook

use crate::domain::{ComparisonReport, ComparisonResult};
use crate::error::NotifyError;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Card title and summary
pub const CARD_TITLE: &str = "📊 Emulator version status";
const CARD_SUMMARY: &str = "Emulator version status";
const CARD_CONTEXT: &str = "http://schema.org/extensions";
const OPEN_TOOL_LABEL: &str = "Open in version tool";

/// Longest error text shown in the table before truncation
pub const MAX_ERROR_CHARS: usize = 40;

const TABLE_HEADER: &str =
    "| Product | Baseline | Latest | Released | Status |\n|:---|:---:|:---:|:---:|:---:|\n";

/// Theme colour when every product matches its baseline
pub const COLOR_ALL_CLEAR: &str = "0076D7";
/// Theme colour when only updates were found
pub const COLOR_UPDATES: &str = "FF6600";
/// Theme colour when at least one downgrade was found
pub const COLOR_DOWNGRADES: &str = "FFA500";

/// Shorten an error to `MAX_ERROR_CHARS` characters plus an ellipsis
pub fn truncate_error(error: &str) -> String {
    if error.chars().count() <= MAX_ERROR_CHARS {
        return error.to_string();
    }
    let mut short: String = error.chars().take(MAX_ERROR_CHARS).collect();
    short.push('…');
    short
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn table_row(result: &ComparisonResult) -> String {
    let latest = match result.error {
        Some(ref error) => truncate_error(error),
        None => result.latest_or_error().to_string(),
    };
    format!(
        "| {} | {} | {} | {} | {} |",
        cell(&result.name),
        cell(result.baseline_version.as_deref().unwrap_or("-")),
        cell(&latest),
        result.release_date.as_deref().unwrap_or("-"),
        result.status
    )
}

/// Render the Markdown table, one row per reported product
pub fn render_table(report: &ComparisonReport) -> String {
    let rows: Vec<String> = report.results.iter().map(table_row).collect();
    format!("{}{}", TABLE_HEADER, rows.join("\n"))
}

/// One-line summary of updates and downgrades
pub fn summary_text(report: &ComparisonReport) -> String {
    let upgrades = report.upgrade_count();
    let downgrades = report.downgrade_count();

    let mut parts = Vec::new();
    if upgrades > 0 {
        parts.push(format!("⬆️ {} update(s)", upgrades));
    }
    if downgrades > 0 {
        parts.push(format!("⬇️ {} downgrade(s)", downgrades));
    }

    if parts.is_empty() {
        "✅ All emulators are up to date".to_string()
    } else {
        format!("**🔔 {} detected!**", parts.join(", "))
    }
}

/// Theme colour for the three severity tiers
pub fn theme_color(report: &ComparisonReport) -> &'static str {
    if report.downgrade_count() > 0 {
        COLOR_DOWNGRADES
    } else if report.upgrade_count() > 0 {
        COLOR_UPDATES
    } else {
        COLOR_ALL_CLEAR
    }
}

/// A card section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub markdown: bool,
}

impl Section {
    fn text(text: String) -> Self {
        Self {
            activity_title: None,
            activity_subtitle: None,
            text: Some(text),
            markdown: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionTarget {
    pub os: String,
    pub uri: String,
}

/// A clickable card action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    #[serde(rename = "@type")]
    pub action_type: String,
    pub name: String,
    pub targets: Vec<ActionTarget>,
}

impl Action {
    /// An action opening `uri` in the browser
    pub fn open_uri(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            action_type: "OpenUri".to_string(),
            name: name.into(),
            targets: vec![ActionTarget {
                os: "default".to_string(),
                uri: uri.into(),
            }],
        }
    }
}

/// Connector card payload accepted by Teams-style webhooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    pub theme_color: String,
    pub summary: String,
    pub sections: Vec<Section>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub potential_action: Vec<Action>,
}

impl MessageCard {
    /// Build the status card for a report
    pub fn build(
        report: &ComparisonReport,
        deep_link: Option<&str>,
        generated_at: NaiveDateTime,
    ) -> Self {
        let header = Section {
            activity_title: Some(CARD_TITLE.to_string()),
            activity_subtitle: Some(generated_at.format("%Y-%m-%d %H:%M:%S").to_string()),
            text: None,
            markdown: true,
        };

        let potential_action = deep_link
            .map(|uri| vec![Action::open_uri(OPEN_TOOL_LABEL, uri)])
            .unwrap_or_default();

        Self {
            card_type: "MessageCard".to_string(),
            context: CARD_CONTEXT.to_string(),
            theme_color: theme_color(report).to_string(),
            summary: CARD_SUMMARY.to_string(),
            sections: vec![
                header,
                Section::text(render_table(report)),
                Section::text(summary_text(report)),
            ],
            potential_action,
        }
    }

    /// Serialize the card as pretty JSON
    pub fn to_json(&self) -> Result<String, NotifyError> {
        serde_json::to_string_pretty(self).map_err(|e| NotifyError::Serialize {
            message: e.to_string(),
        })
    }
}
