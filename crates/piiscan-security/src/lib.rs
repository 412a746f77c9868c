pub mod classifier;
pub mod redactor;

pub use classifier::Classifier;
pub use redactor::{RedactionSummary, Redactor};
