//! Run configuration
//!
//! `MonitorConfig` is assembled once from the command line, an optional TOML
//! file and built-in defaults (in that order of precedence) and is not
//! changed afterwards.

use crate::baseline::DEFAULT_BASELINE_FILE;
use crate::cli::CliArgs;
use crate::domain::default_display_order;
use crate::error::ConfigError;
use crate::notify::SinkConfig;
use crate::resolution::DEFAULT_CONCURRENCY;
use crate::source::{CatalogOptions, Endpoints};
use reqwest::Url;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

/// Schema of the optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    pub baseline: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub deep_link_base: Option<String>,
    /// Seconds, for redirect probes and vendor APIs
    pub timeout: Option<u64>,
    /// Seconds, for release-notes pages and the appcast feed
    pub page_timeout: Option<u64>,
    pub concurrency: Option<usize>,
    pub display_order: Option<Vec<String>>,
    pub endpoints: Option<Endpoints>,
    /// Captures unknown keys for warnings
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, toml::Value>,
}

impl FileConfig {
    /// Load a config file from an explicit path
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|message| ConfigError::TomlParseError {
            path: path.to_path_buf(),
            message,
        })?;

        for key in config.unknown_fields.keys() {
            warn!("unknown config key '{}' will be ignored", key);
        }
        Ok(config)
    }

    /// Parse TOML content
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Immutable configuration for one monitoring run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub baseline_path: PathBuf,
    /// Absent when no webhook is configured
    pub sink: Option<SinkConfig>,
    pub deep_link_base: Option<String>,
    pub catalog: CatalogOptions,
    pub concurrency: usize,
    pub display_order: Vec<String>,
    pub endpoints: Endpoints,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            baseline_path: PathBuf::from(DEFAULT_BASELINE_FILE),
            sink: None,
            deep_link_base: None,
            catalog: CatalogOptions::default(),
            concurrency: DEFAULT_CONCURRENCY,
            display_order: default_display_order(),
            endpoints: Endpoints::default(),
        }
    }
}

impl MonitorConfig {
    /// Build the configuration from CLI arguments, reading `--config` if given
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(args, file)
    }

    /// Merge CLI arguments over file values over defaults
    pub fn merge(args: &CliArgs, file: FileConfig) -> Result<Self, ConfigError> {
        if args.quiet && args.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        let defaults = Self::default();

        let baseline_path = args
            .baseline
            .clone()
            .or(file.baseline)
            .unwrap_or(defaults.baseline_path);

        let webhook_url = non_empty(args.webhook_url.clone().or(file.webhook_url));
        let sink = match webhook_url {
            Some(url) => {
                validate_url("webhook_url", &url)?;
                Some(SinkConfig::new(url))
            }
            None => None,
        };

        let deep_link_base = non_empty(args.deep_link_base.clone().or(file.deep_link_base));
        if let Some(ref base) = deep_link_base {
            validate_url("deep_link_base", base)?;
        }

        let timeout = match args.timeout.or(file.timeout) {
            Some(secs) => secs_to_duration("timeout", secs)?,
            None => defaults.catalog.timeout,
        };
        // --timeout applies to every source
        let page_timeout = match args.timeout.or(file.page_timeout) {
            Some(secs) => secs_to_duration("page_timeout", secs)?,
            None => defaults.catalog.page_timeout,
        };

        let concurrency = args
            .concurrency
            .or(file.concurrency)
            .unwrap_or(defaults.concurrency);
        if concurrency == 0 {
            return Err(ConfigError::invalid_value(
                "concurrency",
                "must be at least 1",
            ));
        }

        let display_order = file.display_order.unwrap_or(defaults.display_order);
        if display_order.is_empty() {
            return Err(ConfigError::invalid_value(
                "display_order",
                "must name at least one product",
            ));
        }

        Ok(Self {
            baseline_path,
            sink,
            deep_link_base,
            catalog: CatalogOptions {
                timeout,
                page_timeout,
            },
            concurrency,
            display_order,
            endpoints: file.endpoints.unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(key: &str, value: &str) -> Result<(), ConfigError> {
    Url::parse(value)
        .map(|_| ())
        .map_err(|e| ConfigError::invalid_value(key, e.to_string()))
}

fn secs_to_duration(key: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::invalid_value(key, "must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["emuwatch"];
        argv.extend_from_slice(extra);
        let mut args = CliArgs::parse_from(argv);
        // Keep the environment out of the tests
        if !extra.contains(&"--webhook-url") {
            args.webhook_url = None;
        }
        if !extra.contains(&"--deep-link-base") {
            args.deep_link_base = None;
        }
        args
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::merge(&args(&[]), FileConfig::default()).unwrap();
        assert_eq!(config, MonitorConfig::default());
        assert_eq!(config.baseline_path, PathBuf::from("emulator_versions.json"));
        assert_eq!(config.catalog.timeout, Duration::from_secs(10));
        assert_eq!(config.catalog.page_timeout, Duration::from_secs(15));
        assert_eq!(config.concurrency, 5);
        assert!(config.sink.is_none());
    }

    #[test]
    fn test_file_values_apply() {
        let file = FileConfig::parse(
            r#"
baseline = "state/versions.json"
webhook_url = "https://hooks.example.com/teams"
timeout = 5
page_timeout = 20
concurrency = 2
display_order = ["MEmu", "NoxPlayer"]

[endpoints]
mumu_appcast = "http://127.0.0.1:9000/appcast"
"#,
        )
        .unwrap();

        let config = MonitorConfig::merge(&args(&[]), file).unwrap();
        assert_eq!(config.baseline_path, PathBuf::from("state/versions.json"));
        assert_eq!(
            config.sink,
            Some(SinkConfig::new("https://hooks.example.com/teams"))
        );
        assert_eq!(config.catalog.timeout, Duration::from_secs(5));
        assert_eq!(config.catalog.page_timeout, Duration::from_secs(20));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.display_order, vec!["MEmu", "NoxPlayer"]);
        assert_eq!(config.endpoints.mumu_appcast, "http://127.0.0.1:9000/appcast");
        assert_eq!(
            config.endpoints.nox_download,
            Endpoints::default().nox_download
        );
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = FileConfig::parse(
            r#"
baseline = "from-file.json"
timeout = 5
concurrency = 2
"#,
        )
        .unwrap();

        let config = MonitorConfig::merge(
            &args(&[
                "--baseline",
                "from-cli.json",
                "--timeout",
                "30",
                "--concurrency",
                "4",
            ]),
            file,
        )
        .unwrap();
        assert_eq!(config.baseline_path, PathBuf::from("from-cli.json"));
        assert_eq!(config.catalog.timeout, Duration::from_secs(30));
        assert_eq!(config.catalog.page_timeout, Duration::from_secs(30));
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_empty_webhook_means_no_sink() {
        let file = FileConfig::parse(r#"webhook_url = "https://hooks.example.com/x""#).unwrap();
        let config = MonitorConfig::merge(&args(&["--webhook-url", ""]), file).unwrap();
        assert!(config.sink.is_none());

        let file = FileConfig::parse(r#"webhook_url = "   ""#).unwrap();
        let config = MonitorConfig::merge(&args(&[]), file).unwrap();
        assert!(config.sink.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let file = FileConfig::parse("page_timeout = 0").unwrap();
        assert!(matches!(
            MonitorConfig::merge(&args(&[]), file),
            Err(ConfigError::InvalidValue { .. })
        ));

        let file = FileConfig::parse("concurrency = 0").unwrap();
        assert!(MonitorConfig::merge(&args(&[]), file).is_err());

        let file = FileConfig::parse("display_order = []").unwrap();
        assert!(MonitorConfig::merge(&args(&[]), file).is_err());

        let result = MonitorConfig::merge(
            &args(&["--deep-link-base", "not a url"]),
            FileConfig::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        let result = MonitorConfig::merge(&args(&["-q", "--verbose"]), FileConfig::default());
        assert!(matches!(
            result,
            Err(ConfigError::ConflictingOptions { .. })
        ));
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let file = FileConfig::parse("webhook = \"typo\"\nconcurrency = 3").unwrap();
        assert!(file.unknown_fields.contains_key("webhook"));
        assert_eq!(file.concurrency, Some(3));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emuwatch.toml");
        fs::write(&path, "deep_link_base = \"https://tool.example.com/\"").unwrap();

        let file = FileConfig::load(&path).unwrap();
        assert_eq!(
            file.deep_link_base.as_deref(),
            Some("https://tool.example.com/")
        );
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            FileConfig::load(&missing),
            Err(ConfigError::ReadError { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "timeout = \"ten\"").unwrap();
        assert!(matches!(
            FileConfig::load(&broken),
            Err(ConfigError::TomlParseError { .. })
        ));
    }

    #[test]
    fn test_from_cli_reads_config_flag() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("emuwatch.toml");
        fs::write(&path, "concurrency = 1").unwrap();

        let cli = args(&["--config", path.to_str().unwrap()]);
        let config = MonitorConfig::from_cli(&cli).unwrap();
        assert_eq!(config.concurrency, 1);
    }
}
