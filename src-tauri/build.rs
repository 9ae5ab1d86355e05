//! Build script for the Snip Solve Tauri app.
//!
//! Generates the Tauri context (config, capabilities, icons) and the
//! `desktop` / `mobile` cfg aliases used by the window-hint module.

fn main() {
    tauri_build::build();
}
