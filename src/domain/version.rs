//! Numeric version values
//!
//! This module provides the VersionValue type used to order dotted numeric
//! version strings such as "9.1.85.0". Anything that does not parse maps to
//! the minimal sentinel `(0,)` so an unknown version never outranks a real one.

use std::cmp::Ordering;
use std::fmt;

/// An ordered tuple of numeric version components
#[derive(Debug, Clone)]
pub struct VersionValue {
    parts: Vec<u64>,
}

impl VersionValue {
    /// The minimal sentinel value `(0,)`
    pub fn sentinel() -> Self {
        Self { parts: vec![0] }
    }

    /// Parse a dotted numeric string, falling back to the sentinel
    pub fn parse(input: Option<&str>) -> Self {
        let Some(s) = input else {
            return Self::sentinel();
        };
        if s.is_empty() {
            return Self::sentinel();
        }

        let mut parts = Vec::new();
        for segment in s.split('.') {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Self::sentinel();
            }
            match segment.parse::<u64>() {
                Ok(n) => parts.push(n),
                Err(_) => return Self::sentinel(),
            }
        }

        Self { parts }
    }

    /// Numeric components as parsed (no padding)
    pub fn parts(&self) -> &[u64] {
        &self.parts
    }

    /// Returns true if this value is the sentinel `(0,)`
    pub fn is_sentinel(&self) -> bool {
        self.parts == [0]
    }
}

impl From<&str> for VersionValue {
    fn from(s: &str) -> Self {
        Self::parse(Some(s))
    }
}

impl Ord for VersionValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Missing trailing components count as zero, so "9.1" == "9.1.0"
        let len = self.parts.len().max(other.parts.len());
        for i in 0..len {
            let a = self.parts.get(i).copied().unwrap_or(0);
            let b = other.parts.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for VersionValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for VersionValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VersionValue {}

impl fmt::Display for VersionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self.parts.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", joined.join("."))
    }
}

/// Compare two optional version strings under VersionValue ordering
pub fn compare_versions(a: Option<&str>, b: Option<&str>) -> Ordering {
    VersionValue::parse(a).cmp(&VersionValue::parse(b))
}
