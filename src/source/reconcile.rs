//! Multi-source reconciliation
//!
//! Queries a public web source and a vendor feed in sequence and keeps the
//! freshest answer. Ties favour the web source; a single working source is
//! enough for success.

use super::{Extractor, Resolved};
use crate::domain::VersionValue;
use crate::error::FetchError;
use async_trait::async_trait;
use tracing::debug;

/// Extractor picking the freshest version from two unreliable sources
pub struct ReconcilingExtractor {
    name: String,
    web: Box<dyn Extractor>,
    vendor: Box<dyn Extractor>,
}

impl ReconcilingExtractor {
    pub fn new(name: impl Into<String>, web: Box<dyn Extractor>, vendor: Box<dyn Extractor>) -> Self {
        Self {
            name: name.into(),
            web,
            vendor,
        }
    }
}

/// Choose between two resolutions: the greater version wins, ties go to `web`
pub fn pick_freshest(web: Resolved, vendor: Resolved) -> Resolved {
    let web_value = VersionValue::from(web.version.as_str());
    let vendor_value = VersionValue::from(vendor.version.as_str());

    if web_value >= vendor_value {
        // Same release reported by both: borrow the vendor's date if the web had none
        if web_value == vendor_value && web.release_date.is_none() {
            let date = vendor.release_date;
            return web.with_release_date(date);
        }
        web
    } else {
        vendor
    }
}

#[async_trait]
impl Extractor for ReconcilingExtractor {
    fn name(&self) -> &str {
        &self.name
    }

    fn strategy(&self) -> &'static str {
        "reconcile"
    }

    async fn extract(&self) -> Result<Resolved, FetchError> {
        let web = self.web.extract().await;
        let vendor = self.vendor.extract().await;

        match (web, vendor) {
            (Ok(web), Ok(vendor)) => {
                debug!(
                    product = %self.name,
                    web = %web.version,
                    vendor = %vendor.version,
                    "reconciling sources"
                );
                Ok(pick_freshest(web, vendor))
            }
            (Ok(web), Err(e)) => {
                debug!(product = %self.name, "vendor source failed: {}", e);
                Ok(web)
            }
            (Err(e), Ok(vendor)) => {
                debug!(product = %self.name, "web source failed: {}", e);
                Ok(vendor)
            }
            (Err(web_err), Err(vendor_err)) => Err(FetchError::AllSourcesFailed {
                details: format!("web: {}; vendor: {}", web_err, vendor_err),
            }),
        }
    }
}
