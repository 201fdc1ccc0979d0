use thiserror::Error;

use crate::conversation::messages;
use crate::conversation::Reply;
use crate::llm_client::LlmError;

/// Conversation-level error type.
/// `into_reply` turns every variant into a user-facing message, so no handler
/// failure ever escapes the update boundary.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("Unsupported document: {0}")]
    UnsupportedDocument(String),

    #[error("No resume uploaded yet")]
    ResumeMissing,

    #[error("Resume or job description missing")]
    ComparisonIncomplete,

    #[error("No text extracted from {0}")]
    EmptyResume(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl BotError {
    pub fn into_reply(self) -> Reply {
        let text = match &self {
            BotError::UnsupportedDocument(name) => {
                tracing::info!("Rejected non-PDF upload: {name:?}");
                messages::UPLOAD_PDF
            }
            BotError::ResumeMissing => messages::UPLOAD_RESUME_FIRST,
            BotError::ComparisonIncomplete => messages::NEED_RESUME_AND_JOB,
            BotError::EmptyResume(name) => {
                tracing::info!("No extractable text in {name:?}");
                messages::EXTRACTION_FAILED
            }
            BotError::Llm(e) => {
                tracing::error!("LLM error: {e:?}");
                messages::SOMETHING_WENT_WRONG
            }
            BotError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                messages::SOMETHING_WENT_WRONG
            }
        };
        Reply::text(text)
    }
}
