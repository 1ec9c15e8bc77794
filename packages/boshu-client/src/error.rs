use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoshuError>;

#[derive(Debug, Error)]
pub enum BoshuError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("boshu API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed items bundle at byte {offset}: {reason}")]
    MalformedStream { offset: usize, reason: String },
}
