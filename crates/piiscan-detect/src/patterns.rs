use lazy_static::lazy_static;
use piiscan_core::{DetectedItem, PiiType};
use regex::Regex;
use tracing::debug;

/// A fixed regular-expression rule for one PII type
pub struct PatternRule {
    pub pii_type: PiiType,
    pub regex: Regex,
}

impl PatternRule {
    fn new(pii_type: PiiType, pattern: &str) -> Self {
        Self {
            pii_type,
            regex: Regex::new(pattern).unwrap(),
        }
    }
}

lazy_static! {
    /// Rules in reporting order. Each runs over the whole text on its own;
    /// overlaps between rules are reported as separate items.
    pub static ref PATTERN_RULES: Vec<PatternRule> = vec![
        PatternRule::new(PiiType::Email, r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}"),
        // 123-456-7890, 123.4567.8901, 1234567890
        PatternRule::new(PiiType::Phone, r"\b\d{3}[-.]?\d{3,4}[-.]?\d{4}\b"),
        // Uppercase only
        PatternRule::new(PiiType::PanCard, r"[A-Z]{5}[0-9]{4}[A-Z]"),
        PatternRule::new(PiiType::AadhaarCard, r"\b\d{4}\s\d{4}\s\d{4}\b"),
        PatternRule::new(PiiType::IndianMobile, r"(?:\+91[\-\s]?)?[6-9]\d{9}"),
    ];
}

/// Run every pattern rule over `text`
pub fn scan_patterns(text: &str) -> Vec<DetectedItem> {
    let mut items = Vec::new();

    for rule in PATTERN_RULES.iter() {
        let before = items.len();
        items.extend(
            rule.regex
                .find_iter(text)
                .map(|m| DetectedItem::pattern(rule.pii_type, m.as_str())),
        );
        debug!(pii_type = %rule.pii_type, count = items.len() - before, "pattern rule applied");
    }

    items
}
