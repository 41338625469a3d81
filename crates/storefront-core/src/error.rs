// crates/storefront-core/src/error.rs
use std::fmt;
use thiserror::Error;

/// Everything that can go wrong while talking to the catalog API or
/// preparing to do so.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered, but not with a 2xx status.
    #[error("catalog returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected payload: {0}")]
    InvalidData(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Coarse classification used by the presentation layer to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Network unreachable, timeout or a non-success status.
    Transport,
    /// Malformed or unexpected JSON.
    Decode,
    Config,
}

impl StoreError {
    pub fn kind(&self) -> FailureKind {
        match self {
            #[cfg(feature = "http")]
            StoreError::Http(e) if e.is_decode() => FailureKind::Decode,
            #[cfg(feature = "http")]
            StoreError::Http(_) => FailureKind::Transport,
            StoreError::Status { .. } | StoreError::Io(_) => FailureKind::Transport,
            StoreError::Json(_) | StoreError::InvalidData(_) => FailureKind::Decode,
            StoreError::InvalidUrl(_) | StoreError::Config(_) => FailureKind::Config,
        }
    }
}

/// Cloneable snapshot of a [`StoreError`].
///
/// Published search state has to be cheap to clone and compare, which the
/// underlying transport errors are not, so the controller keeps only the
/// kind and the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl SearchFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<&StoreError> for SearchFailure {
    fn from(err: &StoreError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

impl From<StoreError> for SearchFailure {
    fn from(err: StoreError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for SearchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_errors_are_decode_failures() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = StoreError::from(err);
        assert_eq!(err.kind(), FailureKind::Decode);
    }

    #[test]
    fn status_errors_are_transport_failures() {
        let err = StoreError::Status {
            status: 503,
            url: "https://example.test/tw/index".into(),
        };
        assert_eq!(err.kind(), FailureKind::Transport);
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn failure_snapshot_keeps_message() {
        let failure = SearchFailure::from(StoreError::InvalidData("tw-id=7".into()));
        assert_eq!(failure.kind, FailureKind::Decode);
        assert_eq!(failure.to_string(), "unexpected payload: tw-id=7");
    }
}
