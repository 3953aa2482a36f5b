//! Companion tool deep link
//!
//! Serializes the comparison into query parameters for an external web
//! tool. Failed products are left out; a product whose latest version
//! differs from its baseline gets `{name}_prev` and `{name}_latest`, any
//! other product only `{name}_latest`.

use crate::domain::{ComparisonReport, Status};
use crate::error::ConfigError;
use reqwest::Url;

/// Query parameters in display order
pub fn deep_link_params(report: &ComparisonReport) -> Vec<(String, String)> {
    let mut params = Vec::new();
    for result in &report.results {
        let Some(latest) = result.latest_version.as_deref() else {
            continue;
        };
        if result.status == Status::Error {
            continue;
        }

        if let (Status::Upgrade | Status::Downgrade, Some(prev)) =
            (result.status, result.baseline_version.as_deref())
        {
            params.push((format!("{}_prev", result.name), prev.to_string()));
        }
        params.push((format!("{}_latest", result.name), latest.to_string()));
    }
    params
}

/// Build the deep link from the tool's base URL
pub fn build_deep_link(base: &str, report: &ComparisonReport) -> Result<String, ConfigError> {
    let params = deep_link_params(report);
    let url = if params.is_empty() {
        Url::parse(base)
    } else {
        Url::parse_with_params(base, &params)
    }
    .map_err(|e| ConfigError::invalid_value("deep_link_base", e.to_string()))?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_display_order, Baseline, VersionRecord};
    use std::collections::BTreeMap;

    fn report(records: Vec<VersionRecord>, baseline: &[(&str, &str)]) -> ComparisonReport {
        let records: BTreeMap<_, _> = records.into_iter().map(|r| (r.name.clone(), r)).collect();
        ComparisonReport::build(
            &records,
            &Baseline::from_versions(baseline.iter().copied()),
            &default_display_order(),
        )
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_equal_versions_emit_only_latest() {
        let report = report(
            vec![VersionRecord::resolved("MEmu", "1.0")],
            &[("MEmu", "1.0")],
        );
        assert_eq!(deep_link_params(&report), vec![pair("MEmu_latest", "1.0")]);
    }

    #[test]
    fn test_differing_versions_emit_both() {
        let report = report(
            vec![VersionRecord::resolved("MEmu", "9.3.1")],
            &[("MEmu", "9.3.0")],
        );
        assert_eq!(
            deep_link_params(&report),
            vec![pair("MEmu_prev", "9.3.0"), pair("MEmu_latest", "9.3.1")]
        );
    }

    #[test]
    fn test_zero_padded_equal_versions_emit_only_latest() {
        let report = report(
            vec![VersionRecord::resolved("MEmu", "9.1.0")],
            &[("MEmu", "9.1")],
        );
        assert_eq!(deep_link_params(&report), vec![pair("MEmu_latest", "9.1.0")]);
    }

    #[test]
    fn test_errors_skipped_and_new_products_emit_latest() {
        let report = report(
            vec![
                VersionRecord::resolved("NoxPlayer", "7.0.6.2"),
                VersionRecord::failed("MEmu", "version not found"),
                VersionRecord::resolved("LDPlayer9", "9.1.85.0"),
            ],
            &[("MEmu", "9.3.0"), ("LDPlayer9", "9.2.0")],
        );
        assert_eq!(
            deep_link_params(&report),
            vec![
                pair("NoxPlayer_latest", "7.0.6.2"),
                pair("LDPlayer9_prev", "9.2.0"),
                pair("LDPlayer9_latest", "9.1.85.0"),
            ]
        );
    }

    #[test]
    fn test_build_deep_link() {
        let report = report(
            vec![VersionRecord::resolved("MEmu", "9.3.1")],
            &[("MEmu", "9.3.0")],
        );
        let link = build_deep_link("https://tool.example.com/versions", &report).unwrap();
        assert_eq!(
            link,
            "https://tool.example.com/versions?MEmu_prev=9.3.0&MEmu_latest=9.3.1"
        );
    }

    #[test]
    fn test_build_deep_link_without_params() {
        let report = report(vec![VersionRecord::failed("MEmu", "timeout")], &[]);
        let link = build_deep_link("https://tool.example.com/versions", &report).unwrap();
        assert_eq!(link, "https://tool.example.com/versions");
    }

    #[test]
    fn test_invalid_base() {
        let report = ComparisonReport::default();
        assert!(build_deep_link("not a url", &report).is_err());
    }
}
