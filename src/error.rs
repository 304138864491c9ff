use std::path::PathBuf;
use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog Error: {0}")]
    CatalogError(#[from] CatalogError),
    #[error("Configuration Error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("Invalid setting {0}: {1:?}")]
    InvalidSetting(&'static str, String),
    #[error("Failed to serialize output: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("Analysis task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

// Image Decode Error Type

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to read image {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to decode image: {0}")]
    ImageError(#[from] image::ImageError),
    #[error("Image has no pixels ({0}x{1})")]
    EmptyImage(u32, u32),
}

impl DecodeError {
    /// Message suitable for showing to whoever uploaded the image.
    pub fn user_message(&self) -> String {
        match self {
            DecodeError::ReadError { .. } => {
                "Could not read the image file. Please check the path and try again.".to_string()
            }
            DecodeError::ImageError(_) => {
                "Could not decode the image. Please upload a PNG or JPG file.".to_string()
            }
            DecodeError::EmptyImage(..) => "The image is empty.".to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Expected 6 hex digits, got {0:?}")]
    InvalidLength(String),
    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {}: {source}", path.display())]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported catalog format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Invalid JSON catalog: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid TOML catalog: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("Catalog contains an empty emotion label")]
    EmptyLabel,
    #[error("Emotion label {0:?} is defined more than once")]
    DuplicateLabel(String),
}
