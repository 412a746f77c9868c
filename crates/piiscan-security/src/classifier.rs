//! Document sensitivity classification

use std::collections::BTreeSet;

use piiscan_core::vocab::{HIGH_TIER_TYPES, MEDIUM_TIER_TYPES};
use piiscan_core::{DetectedItem, PiiType, SensitivityLabel};

/// Maps the set of detected types to a sensitivity label.
///
/// First matching rule wins: nothing found is `Clean`, any contact or
/// government identifier is `High`, any person or place is `Medium`,
/// anything else is `Low`. Item counts and values never matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl Classifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, items: &[DetectedItem]) -> SensitivityLabel {
        if items.is_empty() {
            return SensitivityLabel::Clean;
        }

        let types: BTreeSet<PiiType> = items.iter().map(|item| item.pii_type).collect();

        if HIGH_TIER_TYPES.iter().any(|t| types.contains(t)) {
            SensitivityLabel::High
        } else if MEDIUM_TIER_TYPES.iter().any(|t| types.contains(t)) {
            SensitivityLabel::Medium
        } else {
            SensitivityLabel::Low
        }
    }
}
