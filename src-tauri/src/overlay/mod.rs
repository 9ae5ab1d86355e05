//! Overlay display — the borderless, topmost answer panel.
//!
//! `Overlay` owns the displayed text and its rendered HTML; the
//! `OverlaySurface` it drives is the actual window (or a fake in tests).
//! Sizing works in two steps: the page lays out the HTML and reports the
//! measured content size, then `Overlay::fit` pads and clamps it.

pub mod hints;
pub mod markdown;
pub mod window;

use std::sync::{Mutex, MutexGuard};

pub const PLACEHOLDER: &str = "Fetching...";

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Placement and size limits, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub position: (f64, f64),
    pub initial: Size,
    pub min: Size,
    pub max: Size,
    /// Added to the measured content on each axis for margins and styling.
    pub padding: f64,
}

impl Default for OverlayGeometry {
    fn default() -> Self {
        Self {
            position: (800.0, 0.0),
            initial: Size::new(800.0, 600.0),
            min: Size::new(240.0, 80.0),
            max: Size::new(1200.0, 800.0),
            padding: 40.0,
        }
    }
}

impl OverlayGeometry {
    /// Window size for measured content: content + padding, clamped to [min, max].
    pub fn fit_to_content(&self, content: Size) -> Size {
        let clamp = |value: f64, min: f64, max: f64| {
            let value = if value.is_finite() { value.max(0.0) } else { max };
            (value + self.padding).clamp(min, max)
        };
        Size::new(
            clamp(content.width, self.min.width, self.max.width),
            clamp(content.height, self.min.height, self.max.height),
        )
    }
}

/// Where the overlay actually draws.
pub trait OverlaySurface: Send + Sync {
    fn render(&self, html: &str) -> Result<(), String>;
    fn resize(&self, size: Size) -> Result<(), String>;
}

struct OverlayContent {
    text: String,
    html: String,
}

pub struct Overlay<S> {
    surface: S,
    geometry: OverlayGeometry,
    content: Mutex<OverlayContent>,
}

impl<S: OverlaySurface> Overlay<S> {
    /// Starts on the placeholder. Nothing is pushed to the surface yet;
    /// the page pulls `html()` when it loads.
    pub fn new(surface: S, geometry: OverlayGeometry) -> Self {
        Self {
            surface,
            geometry,
            content: Mutex::new(OverlayContent {
                text: PLACEHOLDER.to_string(),
                html: markdown::render_markdown(PLACEHOLDER),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, OverlayContent> {
        self.content.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn geometry(&self) -> &OverlayGeometry {
        &self.geometry
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    pub fn html(&self) -> String {
        self.lock().html.clone()
    }

    /// Show new text. Identical text is a no-op and returns `false`.
    pub fn update_text(&self, text: &str) -> bool {
        let html = {
            let mut content = self.lock();
            if content.text == text {
                log::debug!("[OVERLAY] Text unchanged, skipping render");
                return false;
            }
            let html = markdown::render_markdown(text);
            content.text = text.to_string();
            content.html = html.clone();
            html
        };

        if let Err(e) = self.surface.render(&html) {
            // The page still pulls html() on load, so this is recoverable.
            log::warn!("[OVERLAY] Failed to push update: {}", e);
        }
        log::info!("[OVERLAY] Rendered {} chars of text", text.len());
        true
    }

    /// Resize the window around the page's measured content.
    pub fn fit(&self, measured: Size) -> Size {
        let size = self.geometry.fit_to_content(measured);
        if let Err(e) = self.surface.resize(size) {
            log::warn!("[OVERLAY] Resize to {}x{} failed: {}", size.width, size.height, e);
        }
        size
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Surface that records what it was asked to do.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub renders: Mutex<Vec<String>>,
        pub sizes: Mutex<Vec<Size>>,
    }

    impl OverlaySurface for RecordingSurface {
        fn render(&self, html: &str) -> Result<(), String> {
            self.renders.lock().unwrap().push(html.to_string());
            Ok(())
        }

        fn resize(&self, size: Size) -> Result<(), String> {
            self.sizes.lock().unwrap().push(size);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::RecordingSurface;
    use super::*;

    fn overlay() -> Overlay<RecordingSurface> {
        Overlay::new(RecordingSurface::default(), OverlayGeometry::default())
    }

    #[test]
    fn starts_on_placeholder() {
        let overlay = overlay();
        assert_eq!(overlay.text(), "Fetching...");
        assert_eq!(overlay.html(), "<p>Fetching...</p>\n");
        assert!(overlay.surface().renders.lock().unwrap().is_empty());
    }

    #[test]
    fn identical_update_renders_once() {
        let overlay = overlay();
        assert!(overlay.update_text("answer"));
        assert!(!overlay.update_text("answer"));
        assert_eq!(overlay.surface().renders.lock().unwrap().len(), 1);
    }

    #[test]
    fn placeholder_update_is_noop() {
        let overlay = overlay();
        assert!(!overlay.update_text(PLACEHOLDER));
        assert!(overlay.surface().renders.lock().unwrap().is_empty());
    }

    #[test]
    fn repeated_distinct_updates_all_render() {
        let overlay = overlay();
        overlay.update_text("one");
        overlay.update_text("two");
        overlay.update_text("one");
        assert_eq!(overlay.surface().renders.lock().unwrap().len(), 3);
        assert_eq!(overlay.text(), "one");
    }

    #[test]
    fn code_fence_reaches_surface_as_code() {
        let overlay = overlay();
        overlay.update_text("```cpp\nint x = 1;\n```");
        let renders = overlay.surface().renders.lock().unwrap();
        assert!(renders[0].contains("<pre><code class=\"language-cpp\">"));
        assert_eq!(overlay.html(), renders[0]);
    }

    #[test]
    fn fit_clamps_to_maximum() {
        let overlay = overlay();
        let size = overlay.fit(Size::new(3000.0, 5000.0));
        assert_eq!(size, Size::new(1200.0, 800.0));
        assert_eq!(*overlay.surface().sizes.lock().unwrap(), vec![size]);
    }

    #[test]
    fn fit_adds_padding_inside_bounds() {
        assert_eq!(overlay().fit(Size::new(500.0, 300.0)), Size::new(540.0, 340.0));
    }

    #[test]
    fn fit_respects_minimum() {
        assert_eq!(overlay().fit(Size::new(10.0, 5.0)), Size::new(240.0, 80.0));
    }

    #[test]
    fn fit_ignores_garbage_measurements() {
        let geometry = OverlayGeometry::default();
        assert_eq!(geometry.fit_to_content(Size::new(-50.0, f64::NAN)), Size::new(240.0, 800.0));
    }
}
