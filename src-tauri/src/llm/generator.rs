//! Answer generation off the UI thread.
//!
//! `AnswerGenerator::spawn` starts one background task and hands back a
//! one-shot receiver. The sender is consumed by the single `send`, so the
//! task can notify at most once; if it dies first the receiver sees the
//! drop, which `pipeline::deliver_answer` renders as an error. No retry,
//! no timeout, no cancellation.

use super::prompts::build_solve_prompt;
use super::{CompletionBackend, GenerateError};
use tokio::sync::oneshot;

pub const NO_ANSWER: &str = "No answer generated.";

#[derive(Debug, Clone)]
pub struct AnswerGenerator<B> {
    backend: B,
    language: String,
}

impl<B: CompletionBackend + Clone> AnswerGenerator<B> {
    pub fn new(backend: B, language: impl Into<String>) -> Self {
        Self {
            backend,
            language: language.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ask the model and always come back with something displayable:
    /// the answer, `NO_ANSWER` for blank output, or `Error: <cause>`.
    pub async fn answer(&self, question: &str) -> String {
        let prompt = build_solve_prompt(&self.language, question);
        log::info!("[LLM] Prompt: {} chars", prompt.len());

        let start = std::time::Instant::now();
        let result = self.backend.complete(&prompt).await;
        let ms = start.elapsed().as_millis();

        match result {
            Ok(text) if !text.trim().is_empty() => {
                log::info!("[LLM] Answer: {} chars in {}ms", text.len(), ms);
                text
            }
            Ok(_) => {
                log::warn!("[LLM] Empty answer after {}ms", ms);
                NO_ANSWER.to_string()
            }
            Err(e) => {
                log::error!("[LLM] Generation failed after {}ms: {}", ms, e);
                error_message(&e)
            }
        }
    }

    /// Run `answer` in the background; the receiver yields exactly one value.
    pub fn spawn(&self, question: String) -> oneshot::Receiver<String> {
        let (tx, rx) = oneshot::channel();
        let generator = self.clone();
        tauri::async_runtime::spawn(async move {
            let answer = generator.answer(&question).await;
            if tx.send(answer).is_err() {
                log::warn!("[LLM] Answer ready but nobody is listening");
            }
        });
        rx
    }
}

/// The one user-facing format for every generation failure.
pub fn error_message(error: &GenerateError) -> String {
    format!("Error: {}", error)
}
