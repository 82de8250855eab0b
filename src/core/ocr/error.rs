use crate::core::clock::ClockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("OCR engine error: {0}")]
    Engine(String),
    #[error("Clock region is empty")]
    EmptyRegion,
    #[error(transparent)]
    Clock(#[from] ClockError),
}
