use burrow_core::StoreError;
use jiff::Timestamp;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("short code not found: {0}")]
    NotFound(String),
    /// The hash strategy ran out of candidates; the ID strategy never collides.
    #[error("no free hash code for {url} after {attempts} attempts")]
    CollisionExhausted { url: String, attempts: u32 },
    #[error("clock moved backwards during id generation: last={last}, now={now}")]
    ClockRegression { last: Timestamp, now: Timestamp },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("id generator error: {0}")]
    Generator(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl From<StoreError> for ShortenerError {
    fn from(value: StoreError) -> Self {
        Self::Storage(value.to_string())
    }
}

impl From<burrow_flake::Error> for ShortenerError {
    fn from(value: burrow_flake::Error) -> Self {
        match value {
            burrow_flake::Error::ClockRegression { last, now } => Self::ClockRegression { last, now },
            other => Self::Generator(other.to_string()),
        }
    }
}
