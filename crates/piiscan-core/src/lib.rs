//! Core domain model for piiscan
//!
//! This crate contains:
//! - The detected-item record shared by detection, classification and redaction
//! - Sensitivity labels
//! - Fixed vocabulary tables (type whitelist, tier sets, redaction marker)

pub mod error;
pub mod item;
pub mod sensitivity;
pub mod vocab;

pub use error::{Error, Result};
pub use item::{DetectedItem, DetectionMethod, PiiType};
pub use sensitivity::SensitivityLabel;
