//! Region selector window.
//!
//! Shows the startup snapshot in a fullscreen, undecorated, topmost
//! webview. The page (`ui/index.html`) draws the drag rectangle and calls
//! `submit_region` once on pointer release.

use super::{save_snapshot, CaptureInfo, CaptureState};
use crate::overlay::hints::{apply_hints, WindowHints};
use tauri::{AppHandle, Manager};

pub const SELECTOR_LABEL: &str = "selector";

/// Persist the stored snapshot for the page, then open the selector.
pub fn open_selector(app: &AppHandle, hints: WindowHints) -> Result<(), Box<dyn std::error::Error>> {
    let start = std::time::Instant::now();
    let state = app.state::<CaptureState>();

    let info = {
        let guard = state.screenshot.lock().map_err(|e| e.to_string())?;
        let snapshot = guard.as_ref().ok_or("No snapshot available — capture first")?;
        let path = save_snapshot(snapshot, &std::env::temp_dir())?;
        CaptureInfo {
            image_path: path.to_string_lossy().to_string(),
            width: snapshot.width(),
            height: snapshot.height(),
        }
    };
    *state.capture_info.lock().map_err(|e| e.to_string())? = Some(info);

    let window = tauri::WebviewWindowBuilder::new(
        app,
        SELECTOR_LABEL,
        tauri::WebviewUrl::App("index.html".into()),
    )
    .title("Select Region")
    .fullscreen(true)
    .decorations(false)
    .always_on_top(true)
    .skip_taskbar(true)
    .build()?;

    apply_hints(&window, SELECTOR_LABEL, hints);

    log::info!(
        "[SELECT] Selector window ready in {}ms",
        start.elapsed().as_millis()
    );
    Ok(())
}

/// Close the selector and delete its temp snapshot. Called only after the
/// overlay exists, or when the run is being abandoned.
pub fn close_selector(app: &AppHandle) {
    if let Some(window) = app.get_webview_window(SELECTOR_LABEL) {
        if let Err(e) = window.destroy() {
            log::warn!("[SELECT] Failed to close selector: {}", e);
        }
    }
    app.state::<CaptureState>().remove_snapshot_file();
}
