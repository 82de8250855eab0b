use super::error::SessionError;
use crate::core::clock::{TimeAnchor, TimeFrameMapper, Timestamp};
use crate::core::config::PlayerConfig;
use crate::core::ocr::ClockDetector;
use crate::core::video::{Frame, FrameSource, VideoError};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 单个视频的浏览状态
///
/// Owns its frame source and its anchor. Nothing here is shared between
/// sessions, so the player can drive several of them in parallel.
pub struct VideoSession {
    path: PathBuf,
    source: Box<dyn FrameSource>,
    fps: f64,
    mapper: TimeFrameMapper,
    screenshot_dir: PathBuf,
    fallback_interval: Duration,
    current_frame: u64,
    current: Option<Frame>,
    remark: String,
    playing: bool,
}

impl VideoSession {
    /// Fails only for a source without frames. A first frame that cannot be
    /// decoded is logged and the session still opens.
    pub fn open(
        path: impl Into<PathBuf>,
        source: Box<dyn FrameSource>,
        config: &PlayerConfig,
    ) -> Result<Self, SessionError> {
        let path = path.into();
        let total_frames = source.total_frames();
        let mapper = TimeFrameMapper::new(total_frames)?;
        let fps = source.frame_rate();

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string());

        let mut session = Self {
            screenshot_dir: config.screenshot_root.join(stem),
            fallback_interval: Duration::from_millis(config.fallback_frame_interval_ms),
            path,
            source,
            fps,
            mapper,
            current_frame: 0,
            current: None,
            remark: String::new(),
            playing: false,
        };

        if let Err(e) = session.show_frame(0) {
            warn!("⚠️ Could not display first frame of {:?}: {}", session.path, e);
        }
        info!(
            "🎬 Video loaded: {:?}, frames={}, fps={}",
            session.path, total_frames, fps
        );
        Ok(session)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn total_frames(&self) -> u64 {
        self.mapper.total_frames()
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn current_frame(&self) -> u64 {
        self.current_frame
    }

    /// The frame currently on display, if any has been decoded.
    pub fn current_image(&self) -> Option<&Frame> {
        self.current.as_ref()
    }

    pub fn screenshot_dir(&self) -> &Path {
        &self.screenshot_dir
    }

    /// Clamps `index` to the last frame. On a read failure the displayed
    /// frame does not change.
    pub fn show_frame(&mut self, index: u64) -> Result<u64, SessionError> {
        let index = index.min(self.total_frames() - 1);
        let image = self.source.read_frame(index)?;
        self.current = Some(Frame::new(index, image));
        self.current_frame = index;
        Ok(index)
    }

    pub fn fast_forward(&mut self, steps: u64) -> Result<u64, SessionError> {
        let target = self.current_frame.saturating_add(steps);
        debug!("Fast forward: +{} -> frame={}", steps, target);
        self.show_frame(target)
    }

    pub fn rewind(&mut self, steps: u64) -> Result<u64, SessionError> {
        let target = self.current_frame.saturating_sub(steps);
        debug!("Rewind: -{} -> frame={}", steps, target);
        self.show_frame(target)
    }

    pub fn remark(&self) -> &str {
        &self.remark
    }

    pub fn set_remark(&mut self, name: &str) {
        self.remark = name.trim().to_string();
        debug!("Remark name set to: {:?}", self.remark);
    }

    pub fn screenshot_path(&self, frame_number: u64) -> PathBuf {
        let prefix = if self.remark.is_empty() {
            "screenshot"
        } else {
            self.remark.as_str()
        };
        self.screenshot_dir
            .join(format!("{}_{}.png", prefix, frame_number))
    }

    pub fn screenshot(&self) -> Result<PathBuf, SessionError> {
        let frame = self.current.as_ref().ok_or(VideoError::NoFrameLoaded)?;
        let path = self.screenshot_path(frame.frame_number);
        frame.save_png(&path)?;
        info!("📸 Screenshot saved: {:?}", path);
        Ok(path)
    }

    pub fn anchor(&self) -> Option<&TimeAnchor> {
        self.mapper.anchor()
    }

    pub fn set_anchor(&mut self, anchor: TimeAnchor) -> Result<(), SessionError> {
        self.mapper.configure(anchor)?;
        Ok(())
    }

    /// Manual start/end entry. The previous anchor is kept when either field
    /// is malformed or the range is empty.
    pub fn apply_start_end(&mut self, start: &str, end: &str) -> Result<TimeAnchor, SessionError> {
        let anchor = TimeAnchor::parse(start, end)?;
        self.set_anchor(anchor)?;
        info!("Manual time set: {} ~ {}", anchor.start(), anchor.end());
        Ok(anchor)
    }

    /// Reads the clock off frame 0 and anchors `span_secs` after it. The
    /// displayed frame is left alone.
    pub fn detect_anchor(
        &mut self,
        detector: &ClockDetector,
        span_secs: i64,
    ) -> Result<TimeAnchor, SessionError> {
        let first = Frame::new(0, self.source.read_frame(0)?);
        let start = detector.detect(&first)?;
        let anchor = TimeAnchor::from_start(start, span_secs)?;
        self.set_anchor(anchor)?;
        info!(
            "✅ OCR success: start = {}, end = {} (start + {}s)",
            anchor.start(),
            anchor.end(),
            span_secs
        );
        Ok(anchor)
    }

    pub fn jump_to_time(&mut self, target: &Timestamp) -> Result<u64, SessionError> {
        let index = self.mapper.map(target)?;
        let shown = self.show_frame(index)?;
        info!("Jump to time: {} -> frame={}", target, shown);
        Ok(shown)
    }

    pub fn jump_to_time_str(&mut self, target: &str) -> Result<u64, SessionError> {
        let target = Timestamp::parse(target)?;
        self.jump_to_time(&target)
    }

    /// Interval between playback ticks: `1000 / fps` ms, at least 1 ms.
    pub fn frame_interval(&self) -> Duration {
        if self.fps.is_finite() && self.fps > 0.0 {
            Duration::from_millis(((1000.0 / self.fps).floor() as u64).max(1))
        } else {
            self.fallback_interval
        }
    }

    pub fn play(&mut self) -> Duration {
        self.playing = true;
        let interval = self.frame_interval();
        info!("▶️ Playing: {:?}, interval={}ms", self.path, interval.as_millis());
        interval
    }

    pub fn pause(&mut self) {
        self.playing = false;
        info!("⏸️ Paused: {:?}", self.path);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// One playback step. Returns whether the frame advanced; playback stops
    /// on the last frame or on a read failure.
    pub fn tick(&mut self) -> Result<bool, SessionError> {
        if !self.playing {
            return Ok(false);
        }
        if self.current_frame + 1 >= self.total_frames() {
            self.playing = false;
            return Ok(false);
        }
        match self.show_frame(self.current_frame + 1) {
            Ok(_) => Ok(true),
            Err(e) => {
                self.playing = false;
                Err(e)
            }
        }
    }
}
