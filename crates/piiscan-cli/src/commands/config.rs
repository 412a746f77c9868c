use anyhow::Result;
use piiscan_config::{Config, KNOWN_MODELS};

pub fn handle(config: &Config) -> Result<()> {
    println!("Config: {}", Config::config_path().display());
    println!("  Model: {}", config.model.name);
    println!("  Model dir: {}", config.model.resolve_dir().display());
    println!("  Known models: {}", KNOWN_MODELS.join(", "));
    println!("  Output suffix: {}", config.output.suffix);
    Ok(())
}
