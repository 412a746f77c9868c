//! Entity-recognition seam

use std::path::Path;
use std::sync::Arc;

use piiscan_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// A labelled span reported by an entity recognizer.
///
/// `text` is the exact span from the scanned input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub label: String,
    pub text: String,
}

impl Entity {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Trait for named-entity recognition backends.
///
/// A loaded recognizer is shared read-only across `detect` calls; backends
/// whose inference needs exclusive access must serialize it internally.
pub trait EntityRecognizer: Send + Sync {
    /// Extract labelled entity spans from the full text
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>>;
}

/// Recognizer over a fixed list of `(label, text)` pairs.
///
/// Reports one entity per literal occurrence, in text order.
#[derive(Debug, Clone, Default)]
pub struct FixedEntities {
    entries: Vec<Entity>,
}

impl FixedEntities {
    pub fn new<L, T>(entries: impl IntoIterator<Item = (L, T)>) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(label, text)| Entity::new(label, text))
                .filter(|entity| !entity.text.is_empty())
                .collect(),
        }
    }
}

impl EntityRecognizer for FixedEntities {
    fn extract_entities(&self, text: &str) -> Result<Vec<Entity>> {
        let mut found: Vec<(usize, Entity)> = self
            .entries
            .iter()
            .flat_map(|entity| {
                text.match_indices(entity.text.as_str())
                    .map(move |(offset, _)| (offset, entity.clone()))
            })
            .collect();

        found.sort_by_key(|(offset, _)| *offset);
        Ok(found.into_iter().map(|(_, entity)| entity).collect())
    }
}

/// Load the named model from `dir`.
///
/// Fails with [`Error::ModelUnavailable`] when the model cannot be loaded;
/// there is no pattern-only fallback.
pub fn load_recognizer(model: &str, dir: &Path) -> Result<Arc<dyn EntityRecognizer>> {
    #[cfg(feature = "onnx")]
    {
        let recognizer = crate::onnx::OnnxRecognizer::load(model, dir)?;
        Ok(Arc::new(recognizer))
    }

    #[cfg(not(feature = "onnx"))]
    {
        let _ = dir;
        Err(Error::model_unavailable(
            model,
            "This build has no entity-recognition backend; rebuild with `--features onnx`.",
        ))
    }
}
