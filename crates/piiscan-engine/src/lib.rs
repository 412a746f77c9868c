use std::collections::BTreeMap;

use piiscan_core::{DetectedItem, PiiType, Result, SensitivityLabel};
use piiscan_detect::Detector;
use piiscan_security::{Classifier, Redactor};
use serde::Serialize;
use tracing::info;

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub items: Vec<DetectedItem>,
    pub sensitivity: SensitivityLabel,
    pub redacted: String,
}

impl ScanReport {
    /// Item count per type, in type order
    pub fn type_counts(&self) -> BTreeMap<PiiType, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.pii_type).or_insert(0) += 1;
        }
        counts
    }
}

/// Detect → classify → redact.
///
/// Classification and redaction only read the detected items.
pub struct Scanner {
    detector: Detector,
    classifier: Classifier,
    redactor: Redactor,
}

impl Scanner {
    pub fn new(detector: Detector) -> Self {
        Self {
            detector,
            classifier: Classifier::new(),
            redactor: Redactor::new(),
        }
    }

    pub fn scan(&self, text: &str) -> Result<ScanReport> {
        // 1. Detect
        let items = self.detector.detect(text)?;

        // 2. Classify
        let sensitivity = self.classifier.classify(&items);

        // 3. Redact
        let redacted = self.redactor.redact(text, &items);

        info!(
            items = items.len(),
            sensitivity = %sensitivity,
            "scan complete"
        );

        Ok(ScanReport {
            items,
            sensitivity,
            redacted,
        })
    }
}
