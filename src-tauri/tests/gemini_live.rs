//! Live check against the real Gemini API.
//!
//! Loads the key from .env.local using dotenvy — same as the app. Skips
//! when no key is configured.

use snip_solve_lib::config::Config;
use snip_solve_lib::llm::{AnswerGenerator, GeminiClient};

fn load_env() {
    let manifest_dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let project_root = manifest_dir.parent().unwrap_or(manifest_dir);
    let env_path = project_root.join(".env.local");
    if env_path.exists() {
        dotenvy::from_path(&env_path).ok();
        eprintln!("[TEST] Loaded {}", env_path.display());
    }
}

#[tokio::test]
async fn live_answer_contains_code_block() {
    load_env();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("SKIP: {}", e);
            return;
        }
    };

    let generator = AnswerGenerator::new(GeminiClient::from_config(&config), config.language.clone());
    let start = std::time::Instant::now();
    let answer = generator
        .answer("Write a function that returns the sum of two integers.")
        .await;
    eprintln!("[TEST] Answer in {}ms:\n{}", start.elapsed().as_millis(), answer);

    assert!(!answer.starts_with("Error: "), "generation failed: {}", answer);
    assert!(answer.contains("```"), "expected a markdown code block");
}
