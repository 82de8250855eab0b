//! 多视频会话：每个视频一个 [`VideoSession`]，由 [`MultiVideoPlayer`] 统一调度

pub mod error;
pub mod player;
pub mod video_session;

pub use error::SessionError;
pub use player::{JumpReport, MultiVideoPlayer, SnapshotReport};
pub use video_session::VideoSession;
