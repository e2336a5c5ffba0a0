use thiserror::Error;

/// Errors raised by the deterministic assessment pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    #[error("Invalid answer for question {question_id}: {reason}")]
    InvalidAnswer { question_id: u32, reason: String },

    /// A map-form answer key that is not a question id at all.
    #[error("Invalid answer: question id '{0}' is not a number")]
    MalformedQuestionId(String),

    #[error("Career not found: {0}")]
    NotFound(String),

    #[error("Requested match count must be positive, got {0}")]
    InvalidN(i64),
}
