// Prevents an extra console window on Windows in release builds.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(e) = snip_solve_lib::run() {
        eprintln!("[STARTUP] {}", e);
        std::process::exit(1);
    }
}
