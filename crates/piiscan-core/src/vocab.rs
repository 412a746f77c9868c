//! Fixed vocabulary tables shared across the pipeline

use crate::item::PiiType;

/// Entity labels kept from the recognizer; everything else is discarded
pub const ENTITY_WHITELIST: [PiiType; 3] = [PiiType::Person, PiiType::Org, PiiType::Gpe];

/// Any of these makes a document `High`
pub const HIGH_TIER_TYPES: [PiiType; 5] = [
    PiiType::Email,
    PiiType::Phone,
    PiiType::IndianMobile,
    PiiType::PanCard,
    PiiType::AadhaarCard,
];

/// Any of these (absent a high-tier type) makes a document `Medium`
pub const MEDIUM_TIER_TYPES: [PiiType; 2] = [PiiType::Person, PiiType::Gpe];

/// Replacement for every redacted value
pub const REDACTION_MARKER: &str = "[REDACTED]";

/// Map a recognizer label onto a whitelisted entity type
pub fn entity_type(label: &str) -> Option<PiiType> {
    ENTITY_WHITELIST
        .into_iter()
        .find(|t| t.as_str() == label)
}
