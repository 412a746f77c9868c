use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Entity-recognition model '{model}' is unavailable. {remediation}")]
    ModelUnavailable { model: String, remediation: String },

    #[error("Entity recognition failed: {0}")]
    Inference(String),

    #[error("Cannot read input '{}': {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn model_unavailable(model: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            model: model.into(),
            remediation: remediation.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_unavailable_names_model_and_fix() {
        let err = Error::model_unavailable("bert-base-NER", "Download it into /tmp/models.");
        let msg = err.to_string();
        assert!(msg.contains("bert-base-NER"));
        assert!(msg.contains("Download it into /tmp/models."));
    }

    #[test]
    fn test_input_unreadable_message() {
        let err = Error::InputUnreadable {
            path: PathBuf::from("data/missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(
            err.to_string(),
            "Cannot read input 'data/missing.txt': not found"
        );
    }
}
