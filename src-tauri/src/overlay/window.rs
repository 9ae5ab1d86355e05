//! The overlay webview window (`ui/overlay.html`) and its Tauri surface.

use super::hints::{apply_hints, WindowHints};
use super::{Overlay, OverlayGeometry, OverlaySurface, Size};
use tauri::{AppHandle, Emitter, Manager};

pub const OVERLAY_LABEL: &str = "overlay";
pub const OVERLAY_UPDATED_EVENT: &str = "overlay-updated";

/// Pushes HTML to the overlay page via an event and resizes its window.
pub struct WebviewSurface {
    app: AppHandle,
}

impl WebviewSurface {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }
}

impl OverlaySurface for WebviewSurface {
    fn render(&self, html: &str) -> Result<(), String> {
        self.app
            .emit_to(OVERLAY_LABEL, OVERLAY_UPDATED_EVENT, html)
            .map_err(|e| e.to_string())
    }

    fn resize(&self, size: Size) -> Result<(), String> {
        let window = self
            .app
            .get_webview_window(OVERLAY_LABEL)
            .ok_or("Overlay window is not open")?;
        window
            .set_size(tauri::LogicalSize::new(size.width, size.height))
            .map_err(|e| e.to_string())
    }
}

pub type AppOverlay = Overlay<WebviewSurface>;

/// Open the overlay at its fixed position, unfocused, then apply hints.
///
/// If it already exists it is left as is.
pub fn open_overlay(
    app: &AppHandle,
    geometry: &OverlayGeometry,
    hints: WindowHints,
) -> Result<(), String> {
    if app.get_webview_window(OVERLAY_LABEL).is_some() {
        return Ok(());
    }

    let window = tauri::WebviewWindowBuilder::new(
        app,
        OVERLAY_LABEL,
        tauri::WebviewUrl::App("overlay.html".into()),
    )
    .title("Snip Solve")
    .inner_size(geometry.initial.width, geometry.initial.height)
    .position(geometry.position.0, geometry.position.1)
    .decorations(false)
    .transparent(true)
    .shadow(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .focused(false)
    .resizable(false)
    .build()
    .map_err(|e| format!("Failed to create overlay window: {}", e))?;

    apply_hints(&window, OVERLAY_LABEL, hints);
    log::info!(
        "[OVERLAY] Window opened at ({}, {}) {}x{}",
        geometry.position.0,
        geometry.position.1,
        geometry.initial.width,
        geometry.initial.height
    );
    Ok(())
}
