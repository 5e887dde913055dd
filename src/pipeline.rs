use std::ffi::OsString;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::config::Padding;
use crate::error::{RedactError, Result};
use crate::loader::{load_image, save_image};
use crate::ocr::TextLocator;
use crate::preprocess::preprocess;
use crate::redact::{redact, PatternTable};

/// Load, preprocess, locate, redact, save. Holds nothing per image.
pub struct Pipeline<L> {
    locator: L,
    patterns: PatternTable,
    padding: Padding,
}

impl<L: TextLocator> Pipeline<L> {
    pub fn new(locator: L, patterns: PatternTable, padding: Padding) -> Self {
        Self {
            locator,
            patterns,
            padding,
        }
    }

    /// Blacks out matching text in `image` and returns the number of boxes painted.
    /// OCR runs on a binarized copy; only the original is modified.
    pub fn redact_image(&self, image: &mut RgbImage) -> Result<usize> {
        let binarized = preprocess(image);
        let tokens = self.locator.locate(&binarized)?;
        Ok(redact(image, &tokens, &self.patterns, self.padding))
    }

    /// Redacts the image at `input_path` and writes it as
    /// `output_dir/<prefix><file name>`, returning the written path.
    pub fn process_file(&self, input_path: &Path, output_dir: &Path, prefix: &str) -> Result<PathBuf> {
        let file_name = input_path.file_name().ok_or_else(|| {
            RedactError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} has no file name", input_path.display()),
            ))
        })?;
        let mut output_name = OsString::from(prefix);
        output_name.push(file_name);
        let output_path = output_dir.join(output_name);

        let mut img = load_image(input_path)?;
        let censored_word_count = self.redact_image(&mut img)?;
        save_image(&img, &output_path)?;

        tracing::info!(
            censored_word_count,
            file = %input_path.display(),
            "Written redacted image"
        );
        Ok(output_path)
    }
}
