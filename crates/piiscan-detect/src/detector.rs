use std::sync::Arc;

use piiscan_core::vocab::entity_type;
use piiscan_core::{DetectedItem, Result};
use tracing::debug;

use crate::patterns::scan_patterns;
use crate::recognizer::EntityRecognizer;

/// Runs the pattern rules and the entity recognizer over a text.
///
/// The recognizer handle is created once by the caller and shared; cloning a
/// `Detector` shares the same loaded model.
#[derive(Clone)]
pub struct Detector {
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Detector {
    pub fn new(recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { recognizer }
    }

    /// Detect PII in `text`.
    ///
    /// Pattern items come first, then whitelisted entities. Nothing is
    /// deduplicated. A recognizer failure fails the whole call.
    pub fn detect(&self, text: &str) -> Result<Vec<DetectedItem>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut items = scan_patterns(text);
        let pattern_count = items.len();

        for entity in self.recognizer.extract_entities(text)? {
            if entity.text.is_empty() {
                continue;
            }
            match entity_type(&entity.label) {
                Some(pii_type) => items.push(DetectedItem::model(pii_type, entity.text)),
                None => debug!(label = %entity.label, "entity label not tracked"),
            }
        }

        debug!(
            patterns = pattern_count,
            entities = items.len() - pattern_count,
            "detection finished"
        );
        Ok(items)
    }
}
