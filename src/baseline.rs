//! Baseline file loading
//!
//! The baseline is a JSON object `name -> {"version": "...", ...}` edited by
//! the operator. It is never written back. A missing or unreadable file
//! degrades to an empty baseline so every product is reported as new.

use crate::domain::Baseline;
use crate::error::BaselineError;
use std::path::Path;
use tracing::{debug, warn};

/// Default baseline file name
pub const DEFAULT_BASELINE_FILE: &str = "emulator_versions.json";

/// Read and parse the baseline file
pub fn read_baseline(path: &Path) -> Result<Baseline, BaselineError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BaselineError::not_found(path));
        }
        Err(e) => return Err(BaselineError::read_error(path, e)),
    };

    parse_baseline(&content).map_err(|message| BaselineError::json_parse_error(path, message))
}

/// Parse baseline JSON, skipping entries that are not objects
pub fn parse_baseline(content: &str) -> Result<Baseline, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let object = value
        .as_object()
        .ok_or_else(|| "expected a JSON object at the top level".to_string())?;

    let entries = object
        .iter()
        .filter_map(|(name, entry)| {
            let Some(object) = entry.as_object() else {
                debug!(product = %name, "skipping baseline entry that is not an object");
                return None;
            };
            let version = object.get("version").and_then(|v| v.as_str());
            if version.is_none() {
                debug!(product = %name, "baseline entry without a string version");
            }
            Some((
                name.clone(),
                crate::domain::BaselineEntry {
                    version: version.map(str::to_string),
                },
            ))
        })
        .collect();

    Ok(Baseline::new(entries))
}

/// Load the baseline, degrading to an empty one on any failure
pub fn load_baseline(path: &Path) -> Baseline {
    match read_baseline(path) {
        Ok(baseline) => {
            debug!(path = %path.display(), entries = baseline.len(), "baseline loaded");
            baseline
        }
        Err(e) => {
            warn!("{}; every product will be treated as new", e);
            Baseline::empty()
        }
    }
}
