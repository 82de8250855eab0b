//! 时钟时间 ↔ 帧号映射
//!
//! Videos carry a burned-in wall clock. The clock is read once (OCR or manual
//! entry) to form a [`TimeAnchor`], and later wall-clock targets are turned
//! into frame indices by linear interpolation across the anchor.

pub mod error;
pub mod extractor;
pub mod mapper;
pub mod timestamp;

pub use error::ClockError;
pub use extractor::TimestampExtractor;
pub use mapper::{TimeAnchor, TimeFrameMapper};
pub use timestamp::{Timestamp, TIMESTAMP_FORMAT};
