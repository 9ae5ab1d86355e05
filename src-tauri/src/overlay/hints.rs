//! Window hints — topmost, click-through, and screen-share exclusion.
//!
//! These are platform capabilities, not core logic. Every hint is
//! best-effort: a failure is logged and the next hint is still tried.
//! Capture exclusion is honoured on Windows and macOS; Linux compositors
//! offer no equivalent, so it is accepted and ignored there.

/// Which hints a window should receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowHints {
    pub always_on_top: bool,
    pub click_through: bool,
    pub exclude_from_capture: bool,
}

/// Something that can take window hints.
pub trait HintTarget {
    fn set_always_on_top(&self, on: bool) -> Result<(), String>;
    fn set_click_through(&self, on: bool) -> Result<(), String>;
    fn set_exclude_from_capture(&self, on: bool) -> Result<(), String>;
}

/// Fallback for targets without window-manager support.
pub struct NoopTarget;

impl HintTarget for NoopTarget {
    fn set_always_on_top(&self, _on: bool) -> Result<(), String> {
        Ok(())
    }

    fn set_click_through(&self, _on: bool) -> Result<(), String> {
        Ok(())
    }

    fn set_exclude_from_capture(&self, _on: bool) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(desktop)]
impl<R: tauri::Runtime> HintTarget for tauri::WebviewWindow<R> {
    fn set_always_on_top(&self, on: bool) -> Result<(), String> {
        tauri::WebviewWindow::set_always_on_top(self, on).map_err(|e| e.to_string())
    }

    fn set_click_through(&self, on: bool) -> Result<(), String> {
        self.set_ignore_cursor_events(on).map_err(|e| e.to_string())
    }

    fn set_exclude_from_capture(&self, on: bool) -> Result<(), String> {
        self.set_content_protected(on).map_err(|e| e.to_string())
    }
}

#[cfg(mobile)]
impl<R: tauri::Runtime> HintTarget for tauri::WebviewWindow<R> {
    fn set_always_on_top(&self, on: bool) -> Result<(), String> {
        NoopTarget.set_always_on_top(on)
    }

    fn set_click_through(&self, on: bool) -> Result<(), String> {
        NoopTarget.set_click_through(on)
    }

    fn set_exclude_from_capture(&self, on: bool) -> Result<(), String> {
        NoopTarget.set_exclude_from_capture(on)
    }
}

/// Apply every enabled hint. Returns how many took effect.
///
/// Disabled hints are left alone rather than explicitly switched off, so a
/// window builder's own settings are not undone.
pub fn apply_hints(target: &dyn HintTarget, label: &str, hints: WindowHints) -> usize {
    let attempts: [(&str, bool, &dyn Fn() -> Result<(), String>); 3] = [
        ("always_on_top", hints.always_on_top, &|| target.set_always_on_top(true)),
        ("click_through", hints.click_through, &|| target.set_click_through(true)),
        ("exclude_from_capture", hints.exclude_from_capture, &|| {
            target.set_exclude_from_capture(true)
        }),
    ];

    let mut applied = 0;
    for (name, enabled, apply) in attempts {
        if !enabled {
            continue;
        }
        match apply() {
            Ok(()) => {
                log::debug!("[HINTS] {} set on '{}'", name, label);
                applied += 1;
            }
            Err(e) => log::warn!("[HINTS] Could not set {} on '{}': {}", name, label, e),
        }
    }
    applied
}
