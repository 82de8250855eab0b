//! 视频帧来源与帧预处理

pub mod error;
pub mod frame;
pub mod source;

pub use error::VideoError;
pub use frame::{Frame, Roi};
pub use source::{FrameSource, ImageSequenceSource, MemoryFrameSource};
