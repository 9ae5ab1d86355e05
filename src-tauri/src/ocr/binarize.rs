//! Grayscale + Otsu binarization ahead of OCR.
//!
//! Tesseract reads clean black/white glyphs far better than anti-aliased
//! screen text on coloured backgrounds, so every crop goes through here.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};

/// Grayscale, pick the Otsu level, and binarize: pixels strictly above the
/// level become 255, the rest 0.
pub fn binarize(image: &DynamicImage) -> GrayImage {
    let gray = image::imageops::grayscale(image);
    let level = otsu_level(&gray);
    log::debug!("[OCR] Otsu threshold: {}", level);
    threshold(&gray, level, ThresholdType::Binary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgba, RgbaImage};

    /// Left half `dark`, right half `light`.
    fn two_tone(dark: u8, light: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(20, 10, |x, _| {
            if x < 10 { Luma([dark]) } else { Luma([light]) }
        }))
    }

    #[test]
    fn bimodal_level_separates_modes() {
        let t = otsu_level(&two_tone(30, 200).to_luma8());
        assert!((30..200).contains(&t), "threshold {} not between modes", t);
    }

    #[test]
    fn binarize_maps_modes_to_black_and_white() {
        let out = binarize(&two_tone(40, 220));
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(19, 9).0[0], 255);
        assert!(out.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn noisy_modes_still_split() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(40, 40, |x, y| {
            let jitter = ((x * 7 + y * 13) % 11) as u8;
            if (x / 4 + y / 4) % 2 == 0 { Luma([20 + jitter]) } else { Luma([180 + jitter]) }
        }));
        let out = binarize(&img);
        assert_eq!(out.get_pixel(0, 0).0[0], 0);
        assert_eq!(out.get_pixel(4, 0).0[0], 255);
        assert!(out.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
    }

    #[test]
    fn dark_text_on_light_background() {
        let rgba = RgbaImage::from_fn(12, 12, |x, _| {
            if x == 5 || x == 6 { Rgba([10, 10, 10, 255]) } else { Rgba([240, 240, 240, 255]) }
        });
        let out = binarize(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(out.get_pixel(5, 3).0[0], 0);
        assert_eq!(out.get_pixel(0, 3).0[0], 255);
    }
}
