use super::error::ClockError;
use super::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// 时间锚点：视频首帧对应 start，其后固定时长对应 end
///
/// Always `end > start`. Replaced as a whole, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeAnchor {
    start: Timestamp,
    end: Timestamp,
}

impl TimeAnchor {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ClockError> {
        if end <= start {
            return Err(ClockError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Anchor spanning `span_secs` after `start`, as produced after OCR.
    pub fn from_start(start: Timestamp, span_secs: i64) -> Result<Self, ClockError> {
        let end = start
            .checked_add_secs(span_secs)
            .ok_or(ClockError::InvalidRange)?;
        Self::new(start, end)
    }

    /// From user text fields: format first, then ordering.
    pub fn parse(start: &str, end: &str) -> Result<Self, ClockError> {
        let start = Timestamp::parse(start)?;
        let end = Timestamp::parse(end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    pub fn duration_secs(&self) -> i64 {
        self.end.seconds_since(&self.start)
    }
}

impl<'de> Deserialize<'de> for TimeAnchor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: Timestamp,
            end: Timestamp,
        }
        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// Linear wall-clock → frame index interpolation for one video.
///
/// Assumes a constant frame rate between the anchor points. Variable frame
/// rate recordings will drift; that is a limitation of the model.
#[derive(Debug, Clone)]
pub struct TimeFrameMapper {
    total_frames: u64,
    anchor: Option<TimeAnchor>,
}

impl TimeFrameMapper {
    pub fn new(total_frames: u64) -> Result<Self, ClockError> {
        if total_frames == 0 {
            return Err(ClockError::EmptyVideo);
        }
        Ok(Self {
            total_frames,
            anchor: None,
        })
    }

    pub fn with_anchor(total_frames: u64, anchor: TimeAnchor) -> Result<Self, ClockError> {
        let mut mapper = Self::new(total_frames)?;
        mapper.configure(anchor)?;
        Ok(mapper)
    }

    pub fn configure(&mut self, anchor: TimeAnchor) -> Result<(), ClockError> {
        if anchor.duration_secs() <= 0 {
            return Err(ClockError::InvalidRange);
        }
        self.anchor = Some(anchor);
        Ok(())
    }

    pub fn anchor(&self) -> Option<&TimeAnchor> {
        self.anchor.as_ref()
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Targets before the anchor saturate to frame 0, after it to the last frame.
    pub fn map(&self, target: &Timestamp) -> Result<u64, ClockError> {
        let anchor = self.anchor.as_ref().ok_or(ClockError::InvalidRange)?;
        let total_secs = anchor.duration_secs();
        if total_secs <= 0 {
            return Err(ClockError::InvalidRange);
        }

        let delta_secs = target.seconds_since(&anchor.start);
        let ratio = (delta_secs as f64 / total_secs as f64).clamp(0.0, 1.0);
        let index = (ratio * self.total_frames as f64).floor() as u64;

        Ok(index.min(self.total_frames - 1))
    }
}
