//! Text location: turns a binarized image into positioned text tokens.
//!
//! [`OcrsLocator`] runs the `ocrs` detection and recognition models
//! in-process. With the `tesseract` feature, `crate::tesseract` adds a
//! locator backed by the system Tesseract library.

use std::fmt;
use std::path::Path;

use image::GrayImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use rten_imageproc::BoundingRect;

use crate::error::{RedactError, Result};

/// Axis-aligned box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {}x{}",
            self.left, self.top, self.width, self.height
        )
    }
}

/// One detected text region.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrToken {
    pub text: String,
    pub bbox: BoundingBox,
    /// Engine-reported confidence, `None` when the engine has no such notion.
    pub confidence: Option<f32>,
}

impl OcrToken {
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
            confidence: None,
        }
    }

    #[must_use]
    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// Anything that can find text in a preprocessed image.
///
/// Implementations return every region they detect, including empty and
/// low-confidence ones; filtering is the redactor's job.
pub trait TextLocator {
    fn locate(&self, image: &GrayImage) -> Result<Vec<OcrToken>>;
}

impl<L: TextLocator + ?Sized> TextLocator for Box<L> {
    fn locate(&self, image: &GrayImage) -> Result<Vec<OcrToken>> {
        (**self).locate(image)
    }
}

pub struct OcrsLocator {
    engine: OcrEngine,
}

impl OcrsLocator {
    pub fn new(detection_model_path: &Path, recognition_model_path: &Path) -> Result<Self> {
        let detection_model = load_model(detection_model_path)?;
        let recognition_model = load_model(recognition_model_path)?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(ocr_error)?;

        Ok(Self { engine })
    }
}

pub(crate) fn ocr_error(err: impl fmt::Display) -> RedactError {
    RedactError::Ocr(err.to_string())
}

fn load_model(path: &Path) -> Result<Model> {
    Model::load_file(path).map_err(|e| RedactError::ModelLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl TextLocator for OcrsLocator {
    fn locate(&self, image: &GrayImage) -> Result<Vec<OcrToken>> {
        let img_source =
            ImageSource::from_bytes(image.as_raw(), image.dimensions()).map_err(ocr_error)?;
        let ocr_input = self.engine.prepare_input(img_source).map_err(ocr_error)?;
        let word_rects = self.engine.detect_words(&ocr_input).map_err(ocr_error)?;

        let mut tokens = Vec::with_capacity(word_rects.len());
        for word in word_rects {
            let lines = self
                .engine
                .recognize_text(&ocr_input, &[vec![word]])
                .map_err(ocr_error)?;
            let text = lines
                .iter()
                .flatten()
                .map(|line| line.to_string())
                .collect::<Vec<_>>()
                .join(" ");

            let rect = word.bounding_rect();
            let corner = rect.top_left();
            let bbox = BoundingBox::new(
                corner.x.round() as i32,
                corner.y.round() as i32,
                rect.width().round().max(0.0) as u32,
                rect.height().round().max(0.0) as u32,
            );
            tokens.push(OcrToken::new(text, bbox));
        }
        tracing::debug!(words = tokens.len(), "ocrs recognized words");
        Ok(tokens)
    }
}
