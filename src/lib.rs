//! Blacks out names, dates of birth and PAN numbers on scanned identity cards.
//!
//! Each image goes through [`preprocess`] for binarization, then an
//! [`ocr::TextLocator`] for text boxes, then [`redact`] for pattern matching and
//! blackout on the original pixels. [`driver::run`] applies that to a folder.

pub mod config;
pub mod driver;
pub mod error;
pub mod loader;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;
pub mod redact;
#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use config::{Padding, RedactConfig};
pub use driver::{run, RunSummary};
pub use error::{RedactError, Result};
pub use ocr::{BoundingBox, OcrToken, OcrsLocator, TextLocator};
pub use pipeline::Pipeline;
pub use redact::{PatternTable, RedactionRegion};
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractLocator;
