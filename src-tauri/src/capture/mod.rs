//! Screen capture domain — public API.
//!
//! This module owns the full-screen snapshot, region geometry, and the
//! selector window. External code should only use what is exported here.

mod region;
mod screenshot;
pub mod selector;

pub use region::Region;
pub use screenshot::{capture_primary_monitor, save_snapshot};

use image::DynamicImage;
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("no monitor available to capture")]
    NoMonitor,
    #[error("screen capture failed: {0}")]
    Screen(#[from] xcap::XCapError),
    #[error("selected region is empty ({0})")]
    EmptyRegion(Region),
    #[error("region {region} lies outside the {width}x{height} snapshot")]
    OutOfBounds {
        region: Region,
        width: u32,
        height: u32,
    },
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("temp file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR failed: {0}")]
    Ocr(String),
    #[error("OCR found no text")]
    NoText,
}

/// Anything that can hand back the pixels inside a screen region.
pub trait RegionSource {
    fn grab(&self, region: Region) -> Result<DynamicImage, CaptureError>;
}

/// A stored full-screen snapshot answers region requests by cropping.
impl RegionSource for DynamicImage {
    fn grab(&self, region: Region) -> Result<DynamicImage, CaptureError> {
        if region.is_empty() {
            return Err(CaptureError::EmptyRegion(region));
        }
        let fits_x = region.x.checked_add(region.width).is_some_and(|r| r <= self.width());
        let fits_y = region.y.checked_add(region.height).is_some_and(|b| b <= self.height());
        if !fits_x || !fits_y {
            return Err(CaptureError::OutOfBounds {
                region,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self.crop_imm(region.x, region.y, region.width, region.height))
    }
}

/// Info needed by the selector page to display the snapshot.
/// Fetched via a Tauri command so the page never races an event.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureInfo {
    pub image_path: String,
    pub width: u32,
    pub height: u32,
}

/// Thread-safe storage for the full-screen snapshot.
/// Held from startup until the region is captured.
pub struct CaptureState {
    pub screenshot: Mutex<Option<DynamicImage>>,
    pub capture_info: Mutex<Option<CaptureInfo>>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self {
            screenshot: Mutex::new(None),
            capture_info: Mutex::new(None),
        }
    }

    pub fn with_snapshot(snapshot: DynamicImage) -> Self {
        Self {
            screenshot: Mutex::new(Some(snapshot)),
            capture_info: Mutex::new(None),
        }
    }

    /// Delete the temp file written for the selector page, if any.
    /// Safe to call more than once; returns the path that was removed.
    pub fn remove_snapshot_file(&self) -> Option<String> {
        let info = self
            .capture_info
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .take()?;
        match std::fs::remove_file(&info.image_path) {
            Ok(()) => {
                log::debug!("[CAPTURE] Removed {}", info.image_path);
                Some(info.image_path)
            }
            Err(e) => {
                log::warn!("[CAPTURE] Failed to remove {}: {}", info.image_path, e);
                None
            }
        }
    }
}

impl Default for CaptureState {
    fn default() -> Self {
        Self::new()
    }
}
