//! Error types for calls against the BreezoMeter API.
//!
//! The three variants are deliberately distinct so callers can react to a
//! network problem, a non-200 answer and a malformed body separately instead
//! of getting one opaque failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced an HTTP response (DNS, timeout,
    /// connection refused, TLS, ...).
    #[error("failed to reach the BreezoMeter API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a status other than 200.
    #[error("BreezoMeter request failed with status {status} {reason}: {body}")]
    RemoteStatus {
        status: u16,
        reason: String,
        /// Truncated response body, kept for diagnostics.
        body: String,
    },

    /// The body was not valid JSON, or the expected `data` field was missing.
    #[error("failed to decode BreezoMeter response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Status code carried by a [`Error::RemoteStatus`], if that is what
    /// this error is.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
