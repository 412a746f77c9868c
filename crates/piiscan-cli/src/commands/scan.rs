use std::io::Read;
use std::path::Path;

use anyhow::Result;
use piiscan_config::{Config, ModelConfig};
use piiscan_core::Error;
use piiscan_detect::{Detector, load_recognizer};
use piiscan_engine::{ScanReport, Scanner};
use serde::Serialize;
use tracing::info;

use crate::cli::ScanArgs;

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ScanReport,
    saved_to: Option<&'a Path>,
}

pub fn handle(args: ScanArgs, config: &Config) -> Result<()> {
    let from_stdin = args.input.as_os_str() == "-";
    let text = read_input(&args.input, from_stdin)?;

    if text.trim().is_empty() {
        eprintln!("Warning: input is empty, nothing to analyze.");
        return Ok(());
    }

    let model = ModelConfig {
        name: args.model.unwrap_or_else(|| config.model.name.clone()),
        dir: args.model_dir.or_else(|| config.model.dir.clone()),
    };
    model.validate()?;

    // Load once; the handle is shared by every detect call in this process
    let model_dir = model.resolve_dir();
    info!(model = %model.name, dir = %model_dir.display(), "loading entity recognizer");
    let recognizer = load_recognizer(&model.name, &model_dir)?;
    let scanner = Scanner::new(Detector::new(recognizer));

    if !args.json {
        println!("--- Processing: {} ---", display_name(&args.input, from_stdin));
        println!("Scanning for PII...");
    }

    let report = scanner.scan(&text)?;

    let output = match (args.output, args.no_save || from_stdin) {
        (Some(path), _) => Some(path),
        (None, true) => None,
        (None, false) => Some(config.output.output_path(&args.input)),
    };
    if let Some(path) = &output {
        std::fs::write(path, &report.redacted)?;
    }

    if args.json {
        let json = JsonReport {
            report: &report,
            saved_to: output.as_deref(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_report(&report, output.as_deref());
    }

    Ok(())
}

fn read_input(path: &Path, from_stdin: bool) -> Result<String, Error> {
    let unreadable = |source| Error::InputUnreadable {
        path: path.to_path_buf(),
        source,
    };

    if from_stdin {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(unreadable)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(unreadable)
    }
}

fn display_name(input: &Path, from_stdin: bool) -> String {
    if from_stdin {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

fn print_report(report: &ScanReport, saved_to: Option<&Path>) {
    println!("\nFound {} potential PII items.", report.items.len());
    for item in &report.items {
        println!(" - [{}] {} (via {})", item.pii_type, item.value, item.method);
    }

    if !report.items.is_empty() {
        let summary: Vec<String> = report
            .type_counts()
            .iter()
            .map(|(pii_type, count)| format!("{}={}", pii_type, count))
            .collect();
        println!("  By type: {}", summary.join(", "));
    }

    println!("\nDocument Sensitivity Level: {}", report.sensitivity);

    println!("\n--- Redacted Text Preview ---");
    println!("{}", report.redacted);
    println!("-----------------------------");

    if let Some(path) = saved_to {
        println!("\nRedacted file saved to: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let err = read_input(Path::new("/definitely/not/here.txt"), false).unwrap_err();
        assert!(matches!(err, Error::InputUnreadable { .. }));
    }

    #[test]
    fn test_read_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

        let err = read_input(&path, false).unwrap_err();
        assert!(matches!(err, Error::InputUnreadable { .. }));
    }

    #[test]
    fn test_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, "Contact a@b.io").unwrap();

        assert_eq!(read_input(&path, false).unwrap(), "Contact a@b.io");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("-"), true), "<stdin>");
        assert_eq!(display_name(Path::new("notes.txt"), false), "notes.txt");
    }
}
