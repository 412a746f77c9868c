use std::collections::BTreeSet;

use piiscan_core::DetectedItem;
use piiscan_core::vocab::REDACTION_MARKER;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a redaction pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummary {
    pub text: String,
    pub distinct_values: usize,
    pub replacements: usize,
}

/// Masks every detected value with [`REDACTION_MARKER`].
///
/// Values are replaced longest first so a shorter value that is a substring
/// of a longer one cannot split it. Matches are found in the input text and
/// a region claimed by an earlier value is never matched again, so inserted
/// markers are never rematched. Replacement is literal, not span based: two
/// equal-length values that overlap in the text race on order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redactor;

impl Redactor {
    pub fn new() -> Self {
        Self
    }

    /// Redact `text` using the values in `items`
    pub fn redact(&self, text: &str, items: &[DetectedItem]) -> String {
        self.redact_with_summary(text, items).text
    }

    pub fn redact_with_summary(&self, text: &str, items: &[DetectedItem]) -> RedactionSummary {
        let values = replacement_order(items);
        let claimed = claim_ranges(text, &values);
        let replacements = claimed.len();
        let result = splice_markers(text, &claimed);

        debug!(
            distinct_values = values.len(),
            replacements, "redaction finished"
        );

        RedactionSummary {
            text: result,
            distinct_values: values.len(),
            replacements,
        }
    }
}

/// Distinct non-empty values, longest first, ties in natural string order
pub fn replacement_order(items: &[DetectedItem]) -> Vec<&str> {
    let distinct: BTreeSet<&str> = items
        .iter()
        .map(|item| item.value.as_str())
        .filter(|value| !value.is_empty())
        .collect();

    let mut values: Vec<&str> = distinct.into_iter().collect();
    // Stable sort keeps the BTreeSet order among equal lengths
    values.sort_by(|a, b| b.len().cmp(&a.len()));
    values
}

/// Non-overlapping byte ranges to mask, in text order.
///
/// Earlier values win any overlap with later ones.
fn claim_ranges(text: &str, values: &[&str]) -> Vec<(usize, usize)> {
    let mut claimed: Vec<(usize, usize)> = Vec::new();

    for value in values {
        for (start, found) in text.match_indices(*value) {
            let end = start + found.len();
            if claimed.iter().any(|&(s, e)| start < e && s < end) {
                continue;
            }
            claimed.push((start, end));
        }
    }

    claimed.sort_unstable();
    claimed
}

fn splice_markers(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    for &(start, end) in ranges {
        result.push_str(&text[cursor..start]);
        result.push_str(REDACTION_MARKER);
        cursor = end;
    }
    result.push_str(&text[cursor..]);

    result
}
