//! Markup for the loading and error placeholders
//!
//! The error message is inserted verbatim. Callers that render
//! server-supplied text are trusting it as HTML.

/// Loading spinner placeholder
pub const LOADING_MARKUP: &str = r#"<div class="spinner"></div>"#;

/// Error banner wrapping `message`
pub fn error_markup(message: &str) -> String {
    format!(r#"<div class="alert alert-error">{message}</div>"#)
}
