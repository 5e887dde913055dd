use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RedactError {
    #[error("failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to save image {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("failed to load OCR model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error("invalid pattern for {label}: {source}")]
    Pattern {
        label: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RedactError>;
