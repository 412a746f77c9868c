//! Detected-item record

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a detected value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PiiType {
    Email,
    Phone,
    PanCard,
    AadhaarCard,
    IndianMobile,
    Person,
    Org,
    Gpe,
}

impl PiiType {
    pub const ALL: [PiiType; 8] = [
        PiiType::Email,
        PiiType::Phone,
        PiiType::PanCard,
        PiiType::AadhaarCard,
        PiiType::IndianMobile,
        PiiType::Person,
        PiiType::Org,
        PiiType::Gpe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PiiType::Email => "EMAIL",
            PiiType::Phone => "PHONE",
            PiiType::PanCard => "PAN_CARD",
            PiiType::AadhaarCard => "AADHAAR_CARD",
            PiiType::IndianMobile => "INDIAN_MOBILE",
            PiiType::Person => "PERSON",
            PiiType::Org => "ORG",
            PiiType::Gpe => "GPE",
        }
    }
}

impl fmt::Display for PiiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PiiType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PiiType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown PII type: {}", s))
    }
}

/// How a value was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DetectionMethod {
    /// Regular-expression rule
    Pattern,
    /// Named-entity recognition
    Model,
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMethod::Pattern => f.write_str("PATTERN"),
            DetectionMethod::Model => f.write_str("MODEL"),
        }
    }
}

/// One detected PII value.
///
/// `value` is the verbatim substring of the scanned text. The same
/// `(pii_type, value)` pair appears once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedItem {
    #[serde(rename = "type")]
    pub pii_type: PiiType,
    pub value: String,
    pub method: DetectionMethod,
}

impl DetectedItem {
    pub fn new(pii_type: PiiType, value: impl Into<String>, method: DetectionMethod) -> Self {
        Self {
            pii_type,
            value: value.into(),
            method,
        }
    }

    pub fn pattern(pii_type: PiiType, value: impl Into<String>) -> Self {
        Self::new(pii_type, value, DetectionMethod::Pattern)
    }

    pub fn model(pii_type: PiiType, value: impl Into<String>) -> Self {
        Self::new(pii_type, value, DetectionMethod::Model)
    }
}
