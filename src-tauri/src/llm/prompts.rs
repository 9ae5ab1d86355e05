//! Prompt template for the SOLVE call.
//!
//! The question text is embedded verbatim, never trimmed or escaped.

/// Builds the user prompt asking for a commented solution in `language`,
/// formatted as a fenced markdown code block.
pub fn build_solve_prompt(language: &str, question: &str) -> String {
    format!(
        "Solve this question using {language} with necessary comments inside a markdown code block:\n{question}"
    )
}
