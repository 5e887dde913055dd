//! Run configuration for the folder driver.

use std::path::{Path, PathBuf};

/// Where images are read from and how redacted copies are named.
#[derive(Debug, Clone)]
pub struct RedactConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Prepended to the original file name of every written image.
    pub output_prefix: String,
    /// File name suffixes picked up from `input_dir`, matched case-sensitively.
    pub extensions: Vec<String>,
}

impl Default for RedactConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            output_prefix: "redacted_".to_string(),
            extensions: vec![".jpg".to_string(), ".jpeg".to_string(), ".png".to_string()],
        }
    }
}

impl RedactConfig {
    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// Whether `path` names a file the driver should process.
    pub fn accepts(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
    }
}

/// Extra pixels added around every redaction box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    pub x: u32,
    pub y: u32,
}

impl Padding {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}
