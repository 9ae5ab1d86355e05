//! Startup configuration — environment variables and `.env` files.
//!
//! Everything is read once in `run()` before any window opens. The only
//! required value is the generation credential; its absence aborts startup.

use crate::overlay::hints::WindowHints;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LANGUAGE: &str = "C++";
pub const DEFAULT_OCR_LANG: &str = "eng";
pub const DEFAULT_STARTUP_DELAY_MS: u64 = 2000;

/// Credential variables, in lookup order.
const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing Google API key! Set GOOGLE_API_KEY in the environment or a .env file.")]
    MissingApiKey,
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    /// Language the model is asked to answer in.
    pub language: String,
    pub ocr_lang: String,
    pub startup_delay: Duration,
    pub selector_hints: WindowHints,
    pub overlay_hints: WindowHints,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| get(*var))
            .ok_or(ConfigError::MissingApiKey)?;

        let startup_delay = match get("STARTUP_DELAY_MS") {
            Some(raw) => {
                let ms = raw.parse::<u64>().map_err(|_| ConfigError::Invalid {
                    var: "STARTUP_DELAY_MS",
                    value: raw.clone(),
                    reason: "expected a whole number of milliseconds",
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_STARTUP_DELAY_MS),
        };

        let click_through = parse_flag("OVERLAY_CLICK_THROUGH", get("OVERLAY_CLICK_THROUGH"), false)?;
        let exclude_from_capture =
            parse_flag("EXCLUDE_FROM_CAPTURE", get("EXCLUDE_FROM_CAPTURE"), true)?;

        Ok(Self {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            language: get("SOLUTION_LANGUAGE").unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            ocr_lang: get("OCR_LANG").unwrap_or_else(|| DEFAULT_OCR_LANG.to_string()),
            startup_delay,
            selector_hints: WindowHints {
                always_on_top: true,
                click_through: false,
                exclude_from_capture,
            },
            overlay_hints: WindowHints {
                always_on_top: true,
                click_through,
                exclude_from_capture,
            },
        })
    }
}

fn parse_flag(var: &'static str, raw: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw,
            reason: "expected true/false",
        }),
    }
}

/// Candidate directories for `.env.local` / `.env`, in priority order.
fn env_search_dirs() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_out.push(cwd);
    }
    // CARGO_MANIFEST_DIR is src-tauri/ at compile time; the project root is its parent.
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    dirs_out.push(manifest_dir.parent().unwrap_or(manifest_dir).to_path_buf());
    if let Some(config_dir) = dirs::config_dir() {
        dirs_out.push(config_dir.join("snip-solve"));
    }
    dirs_out
}

/// Load the first `.env.local` or `.env` found. Existing variables win.
///
/// Returns the path that was loaded, if any.
pub fn load_env_files() -> Option<PathBuf> {
    for dir in env_search_dirs() {
        for env_file in [".env.local", ".env"] {
            let path = dir.join(env_file);
            if !path.exists() {
                continue;
            }
            match dotenvy::from_path(&path) {
                Ok(_) => {
                    eprintln!("[STARTUP] Loaded {}", path.display());
                    return Some(path);
                }
                Err(e) => eprintln!("[STARTUP] Failed to load {}: {}", path.display(), e),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingApiKey));
    }

    #[test]
    fn defaults_applied() {
        let config = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.language, "C++");
        assert_eq!(config.ocr_lang, "eng");
        assert_eq!(config.startup_delay, Duration::from_secs(2));
        assert!(config.overlay_hints.always_on_top);
        assert!(config.overlay_hints.exclude_from_capture);
        assert!(!config.overlay_hints.click_through);
        assert!(!config.selector_hints.click_through);
    }

    #[test]
    fn gemini_key_is_fallback() {
        let config = Config::from_lookup(lookup(&[("GEMINI_API_KEY", "g")])).unwrap();
        assert_eq!(config.api_key, "g");

        let config =
            Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "a"), ("GEMINI_API_KEY", "b")])).unwrap();
        assert_eq!(config.api_key, "a");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "k"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_BASE_URL", "http://127.0.0.1:9000/"),
            ("SOLUTION_LANGUAGE", "Rust"),
            ("STARTUP_DELAY_MS", "0"),
            ("OVERLAY_CLICK_THROUGH", "Yes"),
            ("EXCLUDE_FROM_CAPTURE", "off"),
        ]))
        .unwrap();
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.language, "Rust");
        assert_eq!(config.startup_delay, Duration::ZERO);
        assert!(config.overlay_hints.click_through);
        assert!(!config.overlay_hints.exclude_from_capture);
        assert!(!config.selector_hints.exclude_from_capture);
        // The selector always needs pointer input.
        assert!(!config.selector_hints.click_through);
    }

    #[test]
    fn bad_values_rejected() {
        let err = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "k"), ("STARTUP_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "STARTUP_DELAY_MS", .. }));

        let err = Config::from_lookup(lookup(&[("GOOGLE_API_KEY", "k"), ("OVERLAY_CLICK_THROUGH", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "OVERLAY_CLICK_THROUGH", .. }));
    }
}
