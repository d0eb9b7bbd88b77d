use thiserror::Error;

/// Failures surfaced by the admin client and the view screens built on
/// it. Every variant stops at the screen that triggered the request;
/// nothing here retries automatically.
#[derive(Debug, Error)]
pub enum ClientError {
    /// No bearer credential is stored. Raised before any network I/O.
    #[error("not logged in: missing bearer credential")]
    MissingCredential,

    /// The request never produced an HTTP response (connect, timeout,
    /// body transfer) or the response body could not be decoded.
    #[error("network failure calling {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status. `message` carries the
    /// server's error envelope when one was attached.
    #[error("http status {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Http { status: u16, message: Option<String> },

    /// A 2xx response whose body did not have the promised shape, e.g.
    /// an empty detail array where one element is required.
    #[error("unexpected response shape: {detail}")]
    UnexpectedResponse { detail: String },

    /// Reading or writing the on-disk credential file failed.
    #[error("credential store: {source}")]
    Store {
        #[source]
        source: anyhow::Error,
    },
}

impl ClientError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the fix is to log in again rather than retry.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::MissingCredential)
            || matches!(self.status(), Some(401) | Some(403))
    }
}
