use piiscan_core::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Entity-recognition models this build knows how to load
pub const KNOWN_MODELS: [&str; 1] = ["bert-base-NER"];

/// Configuration for piiscan (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub name: String,

    /// Explicit model directory; defaults to `<data dir>/models/<name>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Appended to the input path when saving the redacted copy
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

fn default_model() -> String {
    KNOWN_MODELS[0].to_string()
}

fn default_suffix() -> String {
    ".redacted.txt".to_string()
}

impl ModelConfig {
    /// Reject model names this build cannot load
    pub fn validate(&self) -> Result<(), Error> {
        if KNOWN_MODELS.contains(&self.name.as_str()) {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "unknown model '{}' (known: {})",
                self.name,
                KNOWN_MODELS.join(", ")
            )))
        }
    }

    /// Directory the model files are loaded from
    pub fn resolve_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => Config::data_dir().join("models").join(&self.name),
        }
    }
}

impl OutputConfig {
    /// Where the redacted copy of `input` is saved
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let mut path = input.as_os_str().to_owned();
        path.push(&self.suffix);
        PathBuf::from(path)
    }
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str::<Config>(&content)?
        } else {
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)?;
            config
        };

        config.model.validate()?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "piiscan", "piiscan") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.piiscan/config.toml")
        }
    }

    /// Get data directory (model files live under it)
    pub fn data_dir() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "piiscan", "piiscan") {
            dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("~/.piiscan")
        }
    }
}
