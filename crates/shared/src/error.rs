use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Server,
    Decode,
}

/// Discriminated failure returned by a dataset fetch.
///
/// An empty 2xx result is not a failure and never produces one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("network request failed: {message}")]
    Transport { message: String },
    #[error("server returned status {status}: {body}")]
    Server { status: u16, body: String },
    #[error("unexpected response body: {message}")]
    Decode { message: String },
}

impl FetchFailure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            FetchFailure::Transport { .. } => FailureKind::Transport,
            FetchFailure::Server { .. } => FailureKind::Server,
            FetchFailure::Decode { .. } => FailureKind::Decode,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchFailure::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type FetchResult<T> = Result<T, FetchFailure>;
