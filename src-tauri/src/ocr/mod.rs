//! OCR domain — turn a screen region into text.
//!
//! grab region → grayscale → Otsu binarize → OCR → trim.
//! External code should only use the types exported here.

pub mod binarize;
mod tesseract;

pub use tesseract::TesseractOcr;

use crate::capture::{CaptureError, Region, RegionSource};
use image::GrayImage;

/// Recognises text in a binarized image.
pub trait OcrEngine {
    fn recognize(&self, image: &GrayImage) -> Result<String, CaptureError>;
}

pub struct TextCapturer<E> {
    engine: E,
}

impl<E: OcrEngine> TextCapturer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Capture and OCR a region. Never fails past this boundary: any error
    /// is logged and reported as `None`.
    pub fn capture_text(&self, source: &dyn RegionSource, region: Region) -> Option<String> {
        match self.try_capture_text(source, region) {
            Ok(text) => Some(text),
            Err(e) => {
                log::error!("[CAPTURE] Screenshot capture failed: {}", e);
                None
            }
        }
    }

    /// Same pipeline as `capture_text`, but with the cause surfaced.
    pub fn try_capture_text(
        &self,
        source: &dyn RegionSource,
        region: Region,
    ) -> Result<String, CaptureError> {
        let start = std::time::Instant::now();
        if region.is_empty() {
            return Err(CaptureError::EmptyRegion(region));
        }

        let crop = source.grab(region)?;
        let crop_ms = start.elapsed().as_millis();

        let binary = binarize::binarize(&crop);
        let binarize_ms = start.elapsed().as_millis() - crop_ms;

        let raw = self.engine.recognize(&binary)?;
        let ocr_ms = start.elapsed().as_millis() - crop_ms - binarize_ms;

        let text = raw.trim().to_string();
        log::info!(
            "[OCR] Region {}: {} chars (crop={}ms, binarize={}ms, ocr={}ms)",
            region,
            text.chars().count(),
            crop_ms,
            binarize_ms,
            ocr_ms
        );
        if text.is_empty() {
            return Err(CaptureError::NoText);
        }
        Ok(text)
    }
}
