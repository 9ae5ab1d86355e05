//! Tauri command handlers.
//!
//! Thin bridges from the two pages' `invoke()` calls into Rust. The one
//! multi-step command, `submit_region`, runs the rest of the flow after
//! the user releases the mouse.

use crate::capture::selector::close_selector;
use crate::capture::{CaptureInfo, CaptureState, Region};
use crate::config::Config;
use crate::llm::AppGenerator;
use crate::ocr::{TesseractOcr, TextCapturer};
use crate::overlay::window::{open_overlay, AppOverlay, OVERLAY_LABEL};
use crate::overlay::hints::WindowHints;
use crate::overlay::{OverlayGeometry, Size};
use crate::pipeline::{self, Phase, RunWindows, Session};
use tauri::{AppHandle, Manager};

/// Tauri command: snapshot path and size for the selector page.
///
/// Pulled on page load instead of pushed as an event, which would race
/// the page's listener.
#[tauri::command]
pub fn get_capture_info(state: tauri::State<'_, CaptureState>) -> Result<CaptureInfo, String> {
    let guard = state.capture_info.lock().map_err(|e| e.to_string())?;
    guard
        .clone()
        .ok_or("No capture info available".to_string())
}

/// Tauri command: the user finished dragging.
///
/// Points are in the selector page's CSS pixels; `view_width` and
/// `view_height` are its viewport size, used to map onto the snapshot.
/// capture text → open overlay → close selector → dispatch generation.
#[tauri::command]
#[allow(clippy::too_many_arguments)]
pub async fn submit_region(
    app: AppHandle,
    start_x: f64,
    start_y: f64,
    end_x: f64,
    end_y: f64,
    view_width: f64,
    view_height: f64,
) -> Result<(), String> {
    let flow_start = std::time::Instant::now();
    let session = app.state::<Session>();
    session.advance(Phase::Capturing).map_err(|e| e.to_string())?;

    let snapshot = {
        let state = app.state::<CaptureState>();
        let mut guard = state.screenshot.lock().map_err(|e| e.to_string())?;
        guard.take()
    };

    let question = match snapshot {
        Some(snapshot) => {
            let (width, height) = (snapshot.width(), snapshot.height());
            let region = Region::from_drag(
                (start_x.round() as i32, start_y.round() as i32),
                (end_x.round() as i32, end_y.round() as i32),
            )
            .scaled(width as f64 / view_width, height as f64 / view_height)
            .clamped_to(width, height);
            log::info!(
                "[SELECT] Drag ({:.0},{:.0}) → ({:.0},{:.0}) in {:.0}x{:.0} view = region {}",
                start_x, start_y, end_x, end_y, view_width, view_height, region
            );

            let ocr_lang = app.state::<Config>().ocr_lang.clone();
            tauri::async_runtime::spawn_blocking(move || {
                TextCapturer::new(TesseractOcr::new(&ocr_lang)).capture_text(&snapshot, region)
            })
            .await
            .unwrap_or_else(|e| {
                log::error!("[CAPTURE] Capture task failed: {}", e);
                None
            })
        }
        None => {
            log::error!("[CAPTURE] No snapshot available");
            None
        }
    };
    log::info!(
        "[PIPELINE] Capture finished in {}ms",
        flow_start.elapsed().as_millis()
    );

    show_result(&app, question)
}

/// The real windows behind `pipeline::present_overlay`.
struct AppWindows<'a> {
    app: &'a AppHandle,
    geometry: &'a OverlayGeometry,
    hints: WindowHints,
}

impl RunWindows for AppWindows<'_> {
    fn open_overlay(&self) -> Result<(), String> {
        open_overlay(self.app, self.geometry, self.hints)
    }

    fn close_selector(&self) {
        close_selector(self.app);
    }

    fn exit(&self, code: i32) {
        self.app.exit(code);
    }
}

/// Open the overlay, retire the selector, and route the captured text.
pub(crate) fn show_result(app: &AppHandle, question: Option<String>) -> Result<(), String> {
    let session = app.state::<Session>();
    let overlay = app.state::<AppOverlay>();

    pipeline::present_overlay(&AppWindows {
        app,
        geometry: overlay.geometry(),
        hints: app.state::<Config>().overlay_hints,
    })?;

    let generator = app.state::<AppGenerator>();
    match pipeline::dispatch_answer(question, overlay.inner(), generator.inner()) {
        Some(receiver) => {
            session.advance(Phase::Generating).map_err(|e| e.to_string())?;
            let app = app.clone();
            tauri::async_runtime::spawn(async move {
                let overlay = app.state::<AppOverlay>();
                pipeline::deliver_answer(receiver, overlay.inner()).await;
                if let Err(e) = app.state::<Session>().advance(Phase::Done) {
                    log::warn!("[PIPELINE] {}", e);
                }
            });
        }
        None => session.advance(Phase::Done).map_err(|e| e.to_string())?,
    }
    Ok(())
}

/// Tauri command: current overlay HTML, pulled by the page on load.
#[tauri::command]
pub fn get_overlay_html(overlay: tauri::State<'_, AppOverlay>) -> String {
    overlay.html()
}

/// Tauri command: the page measured its content; size the window to fit.
#[tauri::command]
pub fn fit_overlay(overlay: tauri::State<'_, AppOverlay>, width: f64, height: f64) -> Size {
    overlay.fit(Size::new(width, height))
}

/// Tauri command: close the overlay. It is the last window, so this ends
/// the process.
#[tauri::command]
pub fn close_overlay(app: AppHandle) -> Result<(), String> {
    if let Some(window) = app.get_webview_window(OVERLAY_LABEL) {
        window.close().map_err(|e| e.to_string())?;
    }
    Ok(())
}
