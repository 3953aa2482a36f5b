//! Product extractor catalogue
//!
//! Wires each monitored product to its extraction strategy, endpoints and
//! patterns. Endpoint URLs can be overridden from the config file.

use super::date_lookup::DEFAULT_WINDOW;
use super::transport::{url_with_query, Transport};
use super::{
    AppcastExtractor, DateLookupExtractor, Extractor, HtmlScrapeExtractor, ReconcilingExtractor,
    RedirectExtractor,
};
use crate::domain::Product;
use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

static NOX_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"v([\d.]+)_").unwrap());
static NOX_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/(\d{8})/").unwrap());
static MEMU_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"MEmu\s+([\d.]+)\s+is officially released").unwrap());
static LDPLAYER_WEB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LDPlayer\s*(9(?:\.\d+){2,3})").unwrap());
static LDPLAYER_API_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LDPlayer_([\d.]+)\.exe").unwrap());
static BLUESTACKS_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+\.\d+\.\d+)").unwrap());

/// Bytes searched around a release-notes match for its date
const PAGE_DATE_WINDOW: usize = 400;

const LDPLAYER_API_PARAMS: &[(&str, &str)] = &[
    ("pid", "dnplayer-kr9"),
    ("openid", "172"),
    ("t", "20251219112033"),
    ("sv", "0900010000"),
    ("n", "7a12ef8a4b748c85d9c7151d76942bd4"),
    ("updatetype", "0"),
];

const BLUESTACKS_PARAMS: &[(&str, &str)] = &[
    ("platform", "win"),
    ("oem", "BlueStacks"),
    ("bluestacks_version", "bs5"),
];

const MUMU_PARAMS: &[(&str, &str)] = &[
    ("version", "3.8.18.2845"),
    ("engine", "NEMUX"),
    ("uuid", "version-check"),
    ("usage", "1"),
    ("package", "mumu"),
    ("channel", "gw-overseas"),
    ("architecture", "x86_64"),
    ("language", "ko"),
    ("country", "ko-KR"),
];

/// Endpoint base URLs, overridable per source
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
    pub nox_download: String,
    pub memu_release_notes: String,
    pub ldplayer_web: String,
    pub ldplayer_api: String,
    pub bluestacks_download: String,
    pub bluestacks_release_notes: String,
    pub mumu_appcast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            nox_download: "https://kr.bignox.com/kr/download/fullPackage".to_string(),
            memu_release_notes: "https://www.memuplay.com/blog/category/release-notes".to_string(),
            ldplayer_web: "https://www.ldplayer.net/other/version-history-and-release-notes.html"
                .to_string(),
            ldplayer_api: "https://apikr2.ldmnq.com/checkMnqVersion".to_string(),
            bluestacks_download: "https://cloud.bluestacks.com/api/getdownloadnow".to_string(),
            bluestacks_release_notes:
                "https://support.bluestacks.com/hc/en-us/articles/360056960211".to_string(),
            mumu_appcast: "https://api.mumuglobal.com/api/appcast".to_string(),
        }
    }
}

/// Timeouts applied by the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Redirect probes and vendor APIs
    pub timeout: Duration,
    /// Release-notes pages and the appcast feed
    pub page_timeout: Duration,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            page_timeout: Duration::from_secs(15),
        }
    }
}

fn with_query(key: &str, base: &str, params: &[(&str, &str)]) -> Result<String, ConfigError> {
    url_with_query(base, params)
        .map_err(|e| ConfigError::invalid_value(format!("endpoints.{}", key), e.to_string()))
}

/// Build the extractors for every monitored product, in display order
pub fn default_extractors(
    transport: Arc<dyn Transport>,
    endpoints: &Endpoints,
    options: CatalogOptions,
) -> Result<Vec<Box<dyn Extractor>>, ConfigError> {
    let nox = RedirectExtractor::new(
        Product::NoxPlayer.name(),
        transport.clone(),
        &endpoints.nox_download,
        NOX_VERSION_RE.clone(),
    )
    .with_date_pattern(NOX_DATE_RE.clone())
    .with_timeout(options.timeout);

    let memu = HtmlScrapeExtractor::new(
        Product::MEmu.name(),
        transport.clone(),
        &endpoints.memu_release_notes,
        MEMU_VERSION_RE.clone(),
    )
    .with_date_window(PAGE_DATE_WINDOW)
    .with_timeout(options.page_timeout);

    let ldplayer_web = HtmlScrapeExtractor::new(
        Product::LDPlayer9.name(),
        transport.clone(),
        &endpoints.ldplayer_web,
        LDPLAYER_WEB_RE.clone(),
    )
    .with_date_window(PAGE_DATE_WINDOW)
    .with_timeout(options.page_timeout);

    // The vendor API serves a certificate that does not verify
    let ldplayer_api = HtmlScrapeExtractor::new(
        Product::LDPlayer9.name(),
        transport.clone(),
        with_query("ldplayer_api", &endpoints.ldplayer_api, LDPLAYER_API_PARAMS)?,
        LDPLAYER_API_RE.clone(),
    )
    .with_user_agent("LDPlayer")
    .without_tls_verification()
    .with_timeout(options.timeout);

    let ldplayer = ReconcilingExtractor::new(
        Product::LDPlayer9.name(),
        Box::new(ldplayer_web),
        Box::new(ldplayer_api),
    );

    let bluestacks_download = RedirectExtractor::new(
        Product::BlueStacks5.name(),
        transport.clone(),
        with_query(
            "bluestacks_download",
            &endpoints.bluestacks_download,
            BLUESTACKS_PARAMS,
        )?,
        BLUESTACKS_VERSION_RE.clone(),
    )
    .with_timeout(options.timeout);

    let bluestacks = DateLookupExtractor::new(
        Box::new(bluestacks_download),
        transport.clone(),
        &endpoints.bluestacks_release_notes,
    )
    .with_window(DEFAULT_WINDOW)
    .with_timeout(options.page_timeout);

    let mumu = AppcastExtractor::new(
        Product::MuMuPlayer.name(),
        transport,
        with_query("mumu_appcast", &endpoints.mumu_appcast, MUMU_PARAMS)?,
    )
    .with_timeout(options.page_timeout);

    Ok(vec![
        Box::new(nox),
        Box::new(memu),
        Box::new(ldplayer),
        Box::new(bluestacks),
        Box::new(mumu),
    ])
}
