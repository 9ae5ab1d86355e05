//! Orchestrator — select → capture → (display + generate) → done.
//!
//! Selecting and capturing are driven by the selector window and the
//! `submit_region` command. Once text is (or is not) captured, the overlay
//! is already showing the placeholder and this module decides what it
//! shows next:
//! - no text → the fixed failure message, generator never invoked
//! - text    → one background generation whose single result lands in
//!             the overlay

use crate::llm::generator::error_message;
use crate::llm::{AnswerGenerator, CompletionBackend, GenerateError};
use crate::overlay::{Overlay, OverlaySurface};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub const CAPTURE_FAILED: &str = "Failed to capture question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    Capturing,
    /// Overlay visible with the placeholder, answer in flight.
    Generating,
    Done,
}

impl Phase {
    pub fn can_advance_to(self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Phase::Selecting, Phase::Capturing)
                | (Phase::Capturing, Phase::Generating)
                | (Phase::Capturing, Phase::Done)
                | (Phase::Generating, Phase::Done)
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("cannot move from {from:?} to {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

/// Current phase of the single run.
pub struct Session {
    phase: Mutex<Phase>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Mutex::new(Phase::Selecting),
        }
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Move to `next` if legal. Check and update happen under one lock, so
    /// a second region submission cannot sneak past the first.
    pub fn advance(&self, next: Phase) -> Result<(), FlowError> {
        let mut phase = self.phase.lock().unwrap_or_else(|p| p.into_inner());
        if !phase.can_advance_to(next) {
            return Err(FlowError::InvalidTransition { from: *phase, to: next });
        }
        log::info!("[PIPELINE] {:?} → {:?}", *phase, next);
        *phase = next;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The two windows of a run, as the orchestrator sees them.
pub trait RunWindows {
    fn open_overlay(&self) -> Result<(), String>;
    fn close_selector(&self);
    fn exit(&self, code: i32);
}

/// Swap the selector for the overlay. The overlay opens first so the app
/// never drops to zero windows. If it cannot open, the selector is torn
/// down and the app exits rather than leaving a dead fullscreen selector.
pub fn present_overlay(windows: &dyn RunWindows) -> Result<(), String> {
    match windows.open_overlay() {
        Ok(()) => {
            windows.close_selector();
            Ok(())
        }
        Err(e) => {
            log::error!("[OVERLAY] {}", e);
            windows.close_selector();
            windows.exit(1);
            Err(e)
        }
    }
}

/// Route captured text. Returns the answer receiver when generation started.
pub fn dispatch_answer<S, B>(
    question: Option<String>,
    overlay: &Overlay<S>,
    generator: &AnswerGenerator<B>,
) -> Option<oneshot::Receiver<String>>
where
    S: OverlaySurface,
    B: CompletionBackend + Clone,
{
    match question.filter(|q| !q.trim().is_empty()) {
        Some(question) => {
            log::info!("[PIPELINE] Dispatching {} chars to the generator", question.len());
            Some(generator.spawn(question))
        }
        None => {
            log::warn!("[PIPELINE] No question captured — skipping generation");
            overlay.update_text(CAPTURE_FAILED);
            None
        }
    }
}

/// Wait for the one answer and show it. A dropped worker still produces
/// exactly one overlay update.
pub async fn deliver_answer<S: OverlaySurface>(
    receiver: oneshot::Receiver<String>,
    overlay: &Overlay<S>,
) -> String {
    let answer = receiver
        .await
        .unwrap_or_else(|_| error_message(&GenerateError::WorkerLost));
    overlay.update_text(&answer);
    answer
}
