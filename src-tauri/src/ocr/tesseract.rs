//! Tesseract OCR via rusty-tesseract (shells out to the `tesseract` binary).

use super::OcrEngine;
use crate::capture::CaptureError;
use image::GrayImage;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TesseractOcr {
    args: rusty_tesseract::Args,
}

impl TesseractOcr {
    /// `lang` is a Tesseract language pack code, e.g. `eng` or `eng+deu`.
    pub fn new(lang: &str) -> Self {
        Self {
            args: rusty_tesseract::Args {
                lang: lang.to_string(),
                ..Default::default()
            },
        }
    }

    fn temp_path() -> PathBuf {
        let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("snip-solve-ocr-{}-{}.png", std::process::id(), n))
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &GrayImage) -> Result<String, CaptureError> {
        // Go through a PNG on disk so the tesseract binary reads exactly
        // the binarized pixels, independent of rusty-tesseract's own image
        // crate version.
        let path = Self::temp_path();
        image.save_with_format(&path, image::ImageFormat::Png)?;

        let result = rusty_tesseract::Image::from_path(path.to_string_lossy().as_ref())
            .and_then(|img| rusty_tesseract::image_to_string(&img, &self.args))
            .map_err(|e| CaptureError::Ocr(e.to_string()));

        if let Err(e) = std::fs::remove_file(&path) {
            log::warn!("[OCR] Failed to remove {}: {}", path.display(), e);
        }
        result
    }
}
