//! Word boxes from the system Tesseract library, through `leptess`.

use std::cell::RefCell;
use std::io::Cursor;
use std::path::Path;

use image::{GrayImage, ImageFormat};
use leptess::{capi, LepTess};

use crate::error::{RedactError, Result};
use crate::ocr::{ocr_error, BoundingBox, OcrToken, TextLocator};

/// One Tesseract handle, reused for every image of a run.
pub struct TesseractLocator {
    engine: RefCell<LepTess>,
}

impl TesseractLocator {
    /// `tessdata_dir` of `None` uses Tesseract's compiled-in search path.
    pub fn new(tessdata_dir: Option<&Path>, lang: &str) -> Result<Self> {
        let data_path = tessdata_dir
            .map(|dir| {
                dir.to_str().ok_or_else(|| {
                    RedactError::Ocr(format!("tessdata path {} is not valid UTF-8", dir.display()))
                })
            })
            .transpose()?;

        let engine = LepTess::new(data_path, lang).map_err(|e| {
            RedactError::Ocr(format!("failed to initialize Tesseract for `{lang}`: {e}"))
        })?;

        Ok(Self {
            engine: RefCell::new(engine),
        })
    }
}

impl TextLocator for TesseractLocator {
    fn locate(&self, image: &GrayImage) -> Result<Vec<OcrToken>> {
        // leptess only accepts encoded images
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(ocr_error)?;

        let mut engine = self.engine.borrow_mut();
        engine.set_image_from_mem(&png).map_err(ocr_error)?;

        let Some(boxes) = engine.get_component_boxes(capi::TessPageIteratorLevel_RIL_WORD, true)
        else {
            return Ok(Vec::new());
        };

        let mut tokens = Vec::new();
        for word in &boxes {
            engine.set_rectangle_from_box(&word);
            let text = engine.get_utf8_text().map_err(ocr_error)?;
            let confidence = engine.mean_text_conf() as f32;

            let geometry = word.get_geometry();
            let bbox = BoundingBox::new(
                geometry.x,
                geometry.y,
                geometry.w.max(0) as u32,
                geometry.h.max(0) as u32,
            );
            tokens.push(OcrToken::new(text.trim(), bbox).with_confidence(confidence));
        }
        tracing::debug!(words = tokens.len(), "tesseract recognized words");
        Ok(tokens)
    }
}
