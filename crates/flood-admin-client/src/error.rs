use flood_admin_core::FailureKind;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request could not be sent, or the body could not be read.
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("Malformed payload from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ApiError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Network { .. } | Self::InvalidConfig(_) => FailureKind::Network,
            Self::Status { .. } => FailureKind::Status,
            Self::Parse { .. } => FailureKind::Parse,
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<ApiError> for FailureKind {
    fn from(e: ApiError) -> Self {
        e.kind()
    }
}
