//! emuwatch - Android emulator version monitor library
//!
//! This library provides the core functionality for tracking emulator
//! releases:
//! - Per-product version extraction from vendor endpoints
//! - Numeric version comparison against an operator baseline
//! - Status card and deep link rendering for chat notifications

pub mod baseline;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod notify;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod resolution;
pub mod source;
