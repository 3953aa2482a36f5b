//! Monitored emulator products

use serde::{Deserialize, Serialize};
use std::fmt;

/// Emulator products with a built-in extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    /// NoxPlayer (download redirect)
    NoxPlayer,
    /// MEmu (release notes blog)
    MEmu,
    /// LDPlayer 9 (web page + vendor API)
    LDPlayer9,
    /// BlueStacks 5 (download redirect + release notes)
    BlueStacks5,
    /// MuMu Player (appcast API)
    MuMuPlayer,
}

impl Product {
    /// Returns the name records and baselines are keyed by
    pub fn name(&self) -> &'static str {
        match self {
            Product::NoxPlayer => "NoxPlayer",
            Product::MEmu => "MEmu",
            Product::LDPlayer9 => "LDPlayer9",
            Product::BlueStacks5 => "BlueStacks5",
            Product::MuMuPlayer => "MuMuPlayer",
        }
    }

    /// Returns all products in presentation order
    pub fn all() -> &'static [Product] {
        &[
            Product::NoxPlayer,
            Product::MEmu,
            Product::LDPlayer9,
            Product::BlueStacks5,
            Product::MuMuPlayer,
        ]
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The curated display order used by the table, console and deep link
pub fn default_display_order() -> Vec<String> {
    Product::all().iter().map(|p| p.name().to_string()).collect()
}
