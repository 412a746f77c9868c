//! Document sensitivity labels

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse document-level sensitivity, ordered from least to most sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensitivityLabel {
    Clean,
    Low,
    Medium,
    High,
}

impl SensitivityLabel {
    /// Human-readable rendering
    pub fn describe(&self) -> &'static str {
        match self {
            SensitivityLabel::Clean => "Clean (No PII Detected)",
            SensitivityLabel::Low => "Low Sensitivity",
            SensitivityLabel::Medium => "Medium Sensitivity",
            SensitivityLabel::High => "High Sensitivity",
        }
    }
}

impl fmt::Display for SensitivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}
