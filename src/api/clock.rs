//! 时钟文本接口 - 面向 UI 文本框，入参出参均为字符串

use crate::core::clock::{ClockError, TimeAnchor, TimeFrameMapper, Timestamp, TimestampExtractor};
use crate::core::config::PlayerConfig;
use serde::{Deserialize, Serialize};

/// 时钟 API 错误类型，便于跨语言传递
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockApiError {
    pub error_type: String,
    pub message: String,
}

impl From<ClockError> for ClockApiError {
    fn from(e: ClockError) -> Self {
        let error_type = match e {
            ClockError::NotFound => "NotFound",
            ClockError::InvalidRange => "InvalidRange",
            ClockError::InvalidFormat(_) => "InvalidFormat",
            ClockError::EmptyVideo => "EmptyVideo",
        };
        Self {
            error_type: error_type.to_string(),
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ClockApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_type, self.message)
    }
}

impl std::error::Error for ClockApiError {}

/// 从 OCR 文本中提取时间，格式化为 `YYYY-MM-DD HH:MM:SS`
///
/// ```
/// use frame_clock::api::clock::extract_clock_time;
///
/// let time = extract_clock_time("Raw: 2024-12-05 09:30:00 camera1".to_string());
/// assert_eq!(time.as_deref(), Some("2024-12-05 09:30:00"));
/// ```
pub fn extract_clock_time(text: String) -> Option<String> {
    TimestampExtractor::extract(&text).ok().map(|t| t.to_string())
}

/// End field filled in after OCR: start plus the default anchor span.
pub fn default_anchor_end(start: String) -> Result<String, ClockApiError> {
    let start = Timestamp::parse(&start)?;
    let anchor = TimeAnchor::from_start(start, PlayerConfig::default().anchor_span_secs)?;
    Ok(anchor.end().to_string())
}

pub fn frame_for_time(
    start: String,
    end: String,
    total_frames: u64,
    target: String,
) -> Result<u64, ClockApiError> {
    let anchor = TimeAnchor::parse(&start, &end)?;
    let mapper = TimeFrameMapper::with_anchor(total_frames, anchor)?;
    let target = Timestamp::parse(&target)?;
    Ok(mapper.map(&target)?)
}
