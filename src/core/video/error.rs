use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to read frame {index}")]
    ReadFailure { index: u64 },
    #[error("No frames found in {0:?}")]
    EmptySource(PathBuf),
    #[error("No frame loaded")]
    NoFrameLoaded,
}
