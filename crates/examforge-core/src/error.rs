//! Generation error types.
//!
//! Constraint violation and data insufficiency are not errors: they degrade
//! to best-effort results with diagnostics. This enum covers the failures
//! that make a generation request unanswerable, so callers can map them to
//! the error-shaped document instead of string matching.

use thiserror::Error;

/// Errors that abort an assessment generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The syllabus declares no chapters at all.
    #[error("syllabus has no chapters")]
    EmptySyllabus,

    /// A chapter's configuration cannot drive a selection.
    #[error("invalid chapter config '{chapter_id}': {reason}")]
    InvalidChapter { chapter_id: String, reason: String },
}
