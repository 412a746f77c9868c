use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "piiscan")]
#[command(about = "Detect, classify and redact PII in text", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan a text file for PII and save a redacted copy
    Scan(ScanArgs),

    /// Show config location and effective settings
    Config,
}

#[derive(Args)]
pub struct ScanArgs {
    /// Text file to scan, or `-` for stdin
    pub input: PathBuf,

    /// Entity-recognition model (default from config: bert-base-NER)
    #[arg(long)]
    pub model: Option<String>,

    /// Directory holding the model files
    #[arg(long)]
    pub model_dir: Option<PathBuf>,

    /// Where to save the redacted text (default: <input>.redacted.txt)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Do not save the redacted text
    #[arg(long, conflicts_with = "output")]
    pub no_save: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
