//! Full-screen snapshot via xcap.

use super::CaptureError;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use xcap::Monitor;

/// Capture the primary monitor. Falls back to the first monitor when
/// none reports itself as primary.
pub fn capture_primary_monitor() -> Result<DynamicImage, CaptureError> {
    let start = std::time::Instant::now();

    let monitors = Monitor::all()?;
    let monitor = monitors
        .iter()
        .find(|m| m.is_primary().unwrap_or(false))
        .or_else(|| monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    let image = monitor.capture_image()?;
    log::info!(
        "[CAPTURE] Primary monitor {}x{} captured in {}ms",
        image.width(),
        image.height(),
        start.elapsed().as_millis()
    );
    Ok(DynamicImage::ImageRgba8(image))
}

/// Write the snapshot to a temp BMP for the selector page.
///
/// BMP is headers + raw pixels, so it skips PNG compression entirely.
/// The webview loads it through the asset protocol.
pub fn save_snapshot(snapshot: &DynamicImage, dir: &Path) -> Result<PathBuf, CaptureError> {
    let start = std::time::Instant::now();
    let path = dir.join(format!("snip-solve-{}.bmp", std::process::id()));
    // BMP has no alpha in most decoders; drop it up front.
    DynamicImage::ImageRgb8(snapshot.to_rgb8()).save_with_format(&path, image::ImageFormat::Bmp)?;
    log::info!(
        "[CAPTURE] Snapshot written to {} in {}ms",
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn snapshot_saved_as_bmp() {
        let dir = std::env::temp_dir().join(format!("snip-solve-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let shot = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 4, Rgba([9, 8, 7, 255])));

        let path = save_snapshot(&shot, &dir).unwrap();
        assert_eq!(path.extension().unwrap(), "bmp");
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (8, 4));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
