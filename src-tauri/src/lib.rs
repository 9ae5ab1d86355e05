//! Snip Solve — Tauri application entry point.
//!
//! Wires the domains together: configuration, the startup snapshot,
//! managed state, and the command registry. Business logic lives in
//! the modules:
//!   - capture/   — snapshot, region geometry, selector window
//!   - ocr/       — binarize + Tesseract
//!   - llm/       — Gemini client and background answer generation
//!   - overlay/   — answer panel, markdown, window hints
//!   - pipeline.rs — phase tracking and answer routing
//!   - commands.rs — Tauri command handlers

pub mod capture;
mod commands;
pub mod config;
pub mod llm;
pub mod ocr;
pub mod overlay;
pub mod pipeline;

use capture::CaptureState;
use config::{Config, ConfigError};
use llm::{AnswerGenerator, GeminiClient};
use overlay::window::WebviewSurface;
use overlay::{Overlay, OverlayGeometry};
use pipeline::{Phase, Session};
use tauri::Manager;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Error running Snip Solve: {0}")]
    Tauri(#[from] tauri::Error),
}

/// Entry point — called from `main`.
///
/// Returns early with `StartupError::Config` before any window opens if
/// the credential is missing.
pub fn run() -> Result<(), StartupError> {
    config::load_env_files();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("[CONFIG] {}", e);
        e
    })?;
    log::info!(
        "[CONFIG] model={}, language={}, ocr_lang={}, overlay_hints={:?}",
        config.model,
        config.language,
        config.ocr_lang,
        config.overlay_hints
    );

    // The generation client is built once here and handed to the generator.
    let generator = AnswerGenerator::new(GeminiClient::from_config(&config), config.language.clone());

    if !config.startup_delay.is_zero() {
        log::info!("[STARTUP] Waiting {}ms before snapshot", config.startup_delay.as_millis());
        std::thread::sleep(config.startup_delay);
    }

    let capture_state = match capture::capture_primary_monitor() {
        Ok(snapshot) => CaptureState::with_snapshot(snapshot),
        Err(e) => {
            log::error!("[CAPTURE] Startup snapshot failed: {}", e);
            CaptureState::new()
        }
    };

    let selector_hints = config.selector_hints;

    tauri::Builder::default()
        .manage(config)
        .manage(generator)
        .manage(capture_state)
        .manage(Session::new())
        .invoke_handler(tauri::generate_handler![
            commands::get_capture_info,
            commands::submit_region,
            commands::get_overlay_html,
            commands::fit_overlay,
            commands::close_overlay,
        ])
        .setup(move |app| {
            log::info!("Snip Solve starting up");
            let handle = app.handle().clone();
            app.manage(Overlay::new(
                WebviewSurface::new(handle.clone()),
                OverlayGeometry::default(),
            ));

            let has_snapshot = app
                .state::<CaptureState>()
                .screenshot
                .lock()
                .map(|guard| guard.is_some())
                .unwrap_or(false);

            let selecting = has_snapshot
                && match capture::selector::open_selector(&handle, selector_hints) {
                    Ok(()) => true,
                    Err(e) => {
                        log::error!("[SELECT] Could not open selector: {}", e);
                        false
                    }
                };

            if !selecting {
                // Nothing to select from: go straight to the failure message.
                app.state::<Session>().advance(Phase::Capturing)?;
                commands::show_result(&handle, None)?;
            }
            Ok(())
        })
        .build(tauri::generate_context!())?
        .run(|app, event| {
            // Closing the selector without a drag skips close_selector.
            if let tauri::RunEvent::Exit = event {
                app.state::<CaptureState>().remove_snapshot_file();
            }
        });

    Ok(())
}
