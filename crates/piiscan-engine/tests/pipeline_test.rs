use std::sync::Arc;

use piiscan_core::vocab::REDACTION_MARKER;
use piiscan_core::{DetectedItem, DetectionMethod, PiiType, SensitivityLabel};
use piiscan_detect::{Detector, FixedEntities};
use piiscan_engine::Scanner;
use piiscan_security::{Classifier, Redactor};

fn scanner(entities: &[(&str, &str)]) -> Scanner {
    let recognizer = Arc::new(FixedEntities::new(entities.iter().copied()));
    Scanner::new(Detector::new(recognizer))
}

#[test]
fn test_contact_scenario() {
    let scanner = scanner(&[("PERSON", "John Doe")]);
    let report = scanner
        .scan("Contact John Doe at john.doe@example.com or call 9876543210.")
        .unwrap();

    assert!(report.items.contains(&DetectedItem::pattern(PiiType::Email, "john.doe@example.com")));
    assert!(report.items.contains(&DetectedItem::pattern(PiiType::IndianMobile, "9876543210")));
    assert!(report.items.contains(&DetectedItem::model(PiiType::Person, "John Doe")));
    assert_eq!(report.sensitivity, SensitivityLabel::High);
    assert_eq!(
        report.redacted,
        "Contact [REDACTED] at [REDACTED] or call [REDACTED]."
    );
}

#[test]
fn test_empty_input() {
    let report = scanner(&[("PERSON", "John")]).scan("").unwrap();

    assert!(report.items.is_empty());
    assert_eq!(report.sensitivity, SensitivityLabel::Clean);
    assert_eq!(report.redacted, "");
}

#[test]
fn test_clean_text() {
    let text = "The quarterly review went well and lunch was good.";
    let report = scanner(&[]).scan(text).unwrap();

    assert!(report.items.is_empty());
    assert_eq!(report.sensitivity, SensitivityLabel::Clean);
    assert_eq!(report.redacted, text);
}

#[test]
fn test_org_only_is_low() {
    let report = scanner(&[("ORG", "Tata Consultancy Services")])
        .scan("Tata Consultancy Services announced results today.")
        .unwrap();

    assert_eq!(
        report.items,
        vec![DetectedItem::model(PiiType::Org, "Tata Consultancy Services")]
    );
    assert_eq!(report.sensitivity, SensitivityLabel::Low);
    assert_eq!(report.redacted, "[REDACTED] announced results today.");
}

#[test]
fn test_place_is_medium() {
    let report = scanner(&[("GPE", "Mumbai")])
        .scan("The meeting moved to Mumbai.")
        .unwrap();

    assert_eq!(report.sensitivity, SensitivityLabel::Medium);
}

#[test]
fn test_name_inside_full_name() {
    let report = scanner(&[("PERSON", "John Smith"), ("PERSON", "John")])
        .scan("John Smith called John")
        .unwrap();

    assert_eq!(report.redacted.matches(REDACTION_MARKER).count(), 2);
    assert!(!report.redacted.contains("Smith"));
}

#[test]
fn test_indian_identifiers() {
    let text = "PAN ABCDE1234F, Aadhaar 1234 5678 9012, mobile +91 9876543210";
    let report = scanner(&[]).scan(text).unwrap();

    for (pii_type, value) in [
        (PiiType::PanCard, "ABCDE1234F"),
        (PiiType::AadhaarCard, "1234 5678 9012"),
        (PiiType::IndianMobile, "+91 9876543210"),
    ] {
        assert!(report.items.contains(&DetectedItem::pattern(pii_type, value)));
    }
    assert!(report.items.iter().all(|i| i.method == DetectionMethod::Pattern));
    assert_eq!(
        report.redacted,
        "PAN [REDACTED], Aadhaar [REDACTED], mobile [REDACTED]"
    );
}

#[test]
fn test_redaction_idempotent() {
    let report = scanner(&[("PERSON", "Priya")])
        .scan("Priya: priya@example.org")
        .unwrap();
    let again = Redactor::new().redact(&report.redacted, &[]);

    assert_eq!(again, report.redacted);
}

#[test]
fn test_classification_matches_standalone_classifier() {
    let report = scanner(&[("PERSON", "Asha"), ("GPE", "Delhi")])
        .scan("Asha lives in Delhi.")
        .unwrap();

    assert_eq!(report.sensitivity, Classifier::new().classify(&report.items));
    assert_eq!(report.sensitivity, SensitivityLabel::Medium);
}

#[test]
fn test_type_counts() {
    let report = scanner(&[("PERSON", "Ravi")])
        .scan("Ravi and Ravi wrote to a@b.io")
        .unwrap();
    let counts = report.type_counts();

    assert_eq!(counts.get(&PiiType::Person), Some(&2));
    assert_eq!(counts.get(&PiiType::Email), Some(&1));
    assert_eq!(counts.get(&PiiType::Phone), None);
}

#[test]
fn test_report_serializes() {
    let report = scanner(&[]).scan("mail a@b.io").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["sensitivity"], "High");
    assert_eq!(json["items"][0]["type"], "EMAIL");
    assert_eq!(json["redacted"], "mail [REDACTED]");
}

#[test]
fn test_shared_detector_across_threads() {
    let scanner = Arc::new(scanner(&[("PERSON", "Meera")]));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let scanner = Arc::clone(&scanner);
            std::thread::spawn(move || {
                scanner
                    .scan(&format!("Meera ticket {i}"))
                    .unwrap()
                    .sensitivity
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), SensitivityLabel::Medium);
    }
}
