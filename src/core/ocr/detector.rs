use super::engine::OcrEngine;
use super::error::OcrError;
use crate::core::clock::{Timestamp, TimestampExtractor};
use crate::core::config::OcrConfig;
use crate::core::video::{Frame, Roi};
use log::{debug, info};

/// 从画面中的时钟区域识别时间
pub struct ClockDetector {
    engine: Box<dyn OcrEngine>,
    roi: Roi,
    threshold: u8,
}

impl ClockDetector {
    pub fn new(engine: Box<dyn OcrEngine>, roi: Roi, threshold: u8) -> Self {
        Self {
            engine,
            roi,
            threshold,
        }
    }

    pub fn from_config(engine: Box<dyn OcrEngine>, config: &OcrConfig) -> Self {
        Self::new(engine, config.roi, config.threshold)
    }

    pub fn roi(&self) -> Roi {
        self.roi
    }

    pub fn detect(&self, frame: &Frame) -> Result<Timestamp, OcrError> {
        let region = frame.clock_region(&self.roi, self.threshold);
        if region.width() == 0 || region.height() == 0 {
            return Err(OcrError::EmptyRegion);
        }

        let raw = self.engine.recognize_text(&region)?;
        debug!("[OCR Raw]: {:?}", raw);
        debug!("[OCR Normalized]: {:?}", TimestampExtractor::normalize(&raw));

        let timestamp = TimestampExtractor::extract(&raw)?;
        info!("🕒 Clock detected on frame {}: {}", frame.frame_number, timestamp);
        Ok(timestamp)
    }
}
