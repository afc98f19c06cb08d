use shared::error::FetchFailure;
use thiserror::Error;

use crate::ViewKind;

#[derive(Debug, Error)]
pub enum ClientBuildError {
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

/// Failure of one view's load, carrying the message shown inline for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ViewError {
    pub view: ViewKind,
    pub message: String,
    pub failure: FetchFailure,
}

impl ViewError {
    pub fn new(view: ViewKind, failure: FetchFailure) -> Self {
        let subject = match view {
            ViewKind::List => "Could not load the game list",
            ViewKind::Featured => "Could not load featured games",
            ViewKind::Options => "Could not load filter options",
            ViewKind::Today => "Could not load today's games",
            ViewKind::Week => "Could not load this week's games",
        };
        let detail = match &failure {
            FetchFailure::Server { status, body } if body.trim().is_empty() => {
                format!("HTTP {status}")
            }
            FetchFailure::Server { status, body } => format!("HTTP {status}: {}", body.trim()),
            FetchFailure::Transport { message } => format!("network error: {message}"),
            FetchFailure::Decode { message } => format!("malformed response: {message}"),
        };
        Self {
            view,
            message: format!("{subject} ({detail})"),
            failure,
        }
    }
}
