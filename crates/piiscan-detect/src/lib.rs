//! PII detection
//!
//! Two independent strategies whose results are concatenated:
//! - fixed regular-expression rules (`patterns`)
//! - named-entity recognition behind the [`EntityRecognizer`] trait

pub mod detector;
pub mod onnx;
pub mod patterns;
pub mod recognizer;

pub use detector::Detector;
pub use patterns::{PatternRule, scan_patterns};
pub use recognizer::{Entity, EntityRecognizer, FixedEntities, load_recognizer};

#[cfg(feature = "onnx")]
pub use onnx::OnnxRecognizer;
