use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClockError {
    #[error("no valid timestamp found in text")]
    NotFound,
    #[error("invalid time range: end time must be later than start time")]
    InvalidRange,
    #[error("time format error (expected YYYY-MM-DD HH:MM:SS): {0:?}")]
    InvalidFormat(String),
    #[error("video has no frames")]
    EmptyVideo,
}
