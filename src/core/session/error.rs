use crate::core::clock::ClockError;
use crate::core::ocr::OcrError;
use crate::core::video::VideoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error(transparent)]
    Video(#[from] VideoError),
    #[error(transparent)]
    Ocr(#[from] OcrError),
    #[error("No video at index {0}")]
    NoSuchVideo(usize),
    #[error("No clock detector configured")]
    NoDetector,
}
