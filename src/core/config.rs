use crate::core::video::Roi;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub roi: Roi,
    /// 二值化阈值，亮度大于该值视为白色
    pub threshold: u8,
    pub tesseract_cmd: String,
    pub psm: Option<u8>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            roi: Roi::default(),
            threshold: 128,
            tesseract_cmd: "tesseract".to_string(),
            psm: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Screenshots go to `<screenshot_root>/<video stem>/`.
    pub screenshot_root: PathBuf,
    /// Anchor length after an OCR-detected start time.
    pub anchor_span_secs: i64,
    /// Playback tick when the source reports no usable fps.
    pub fallback_frame_interval_ms: u64,
    pub sequence_fps: f64,
    /// Read the clock off the first frame as soon as a video is added.
    pub auto_detect_anchor: bool,
    pub ocr: OcrConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            screenshot_root: PathBuf::from("screenshots"),
            anchor_span_secs: 5 * 60,
            fallback_frame_interval_ms: 40,
            sequence_fps: 25.0,
            auto_detect_anchor: true,
            ocr: OcrConfig::default(),
        }
    }
}

impl PlayerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
