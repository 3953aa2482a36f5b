//! Core domain models for emuwatch
//!
//! This module contains the fundamental types used throughout the application:
//! - Numeric version values and their ordering
//! - Resolved version records
//! - Product catalogue and display order
//! - Baseline mapping
//! - Status classification and comparison reports

mod baseline;
mod comparison;
mod product;
mod record;
mod status;
mod version;

pub use baseline::{Baseline, BaselineEntry};
pub use comparison::{ComparisonReport, ComparisonResult};
pub use product::{default_display_order, Product};
pub use record::VersionRecord;
pub use status::{classify, Status};
pub use version::{compare_versions, VersionValue};
