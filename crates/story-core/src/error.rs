//! Error types for story construction and configuration

use thiserror::Error;

/// Errors that can occur while building a story or its controller
#[derive(Error, Debug)]
pub enum StoryError {
    #[error("story has no pages")]
    EmptyStory,

    #[error("duplicate page id '{0}'")]
    DuplicatePageId(String),

    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        name: &'static str,
        reason: String,
    },

    #[error("required element not found: {0}")]
    MissingElement(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("story manifest error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoryError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        StoryError::InvalidSetting {
            name,
            reason: reason.into(),
        }
    }
}
