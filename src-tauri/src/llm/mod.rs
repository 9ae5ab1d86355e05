//! LLM domain — turn captured question text into an answer.
//!
//! Public API for the generation layer. External code should only use
//! the items exported here.
//!
//!   - gemini.rs    — Google Gemini `generateContent` client
//!   - prompts.rs   — SOLVE prompt template
//!   - generator.rs — background answer task + one-shot delivery

mod gemini;
pub mod generator;
pub mod prompts;

pub use gemini::GeminiClient;
pub use generator::{AnswerGenerator, NO_ANSWER};

use std::future::Future;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("prompt blocked by the service ({0})")]
    Blocked(String),
    #[error("answer worker stopped before replying")]
    WorkerLost,
}

/// A remote text-generation endpoint: prompt in, text out.
pub trait CompletionBackend: Send + Sync + 'static {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

/// The generator the app runs with.
pub type AppGenerator = AnswerGenerator<GeminiClient>;
