use super::error::SessionError;
use super::video_session::VideoSession;
use crate::core::clock::{ClockError, TimeAnchor, Timestamp};
use crate::core::config::PlayerConfig;
use crate::core::ocr::{ClockDetector, TesseractEngine};
use crate::core::video::{FrameSource, ImageSequenceSource};
use log::{info, warn};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 批量截图结果
#[derive(Debug, Clone, Default)]
pub struct SnapshotReport {
    pub saved: Vec<PathBuf>,
    pub failures: usize,
}

/// 全局跳转结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpReport {
    /// `(video index, frame index)` for every video that moved.
    pub jumped: Vec<(usize, u64)>,
    /// Videos without an anchor.
    pub skipped: Vec<usize>,
    pub failed: Vec<usize>,
}

enum JumpOutcome {
    Jumped(u64),
    Skipped,
    Failed,
}

/// Several videos reviewed side by side.
///
/// Global operations fan out over the sessions with rayon. Each session is
/// handed to exactly one worker.
pub struct MultiVideoPlayer {
    config: PlayerConfig,
    detector: Option<ClockDetector>,
    sessions: Vec<VideoSession>,
}

impl MultiVideoPlayer {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            config,
            detector: None,
            sessions: Vec::new(),
        }
    }

    /// Player that reads clocks with the `tesseract` command-line tool.
    pub fn with_tesseract(config: PlayerConfig) -> Self {
        let engine = TesseractEngine::from_config(&config.ocr);
        let detector = ClockDetector::from_config(Box::new(engine), &config.ocr);
        Self::new(config).with_detector(detector)
    }

    pub fn with_detector(mut self, detector: ClockDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Opens a session and, when enabled, anchors it from the clock on its
    /// first frame. An OCR miss is logged; the video is still added.
    pub fn add_video(
        &mut self,
        path: impl Into<PathBuf>,
        source: Box<dyn FrameSource>,
    ) -> Result<usize, SessionError> {
        let mut session = VideoSession::open(path, source, &self.config)?;

        if self.config.auto_detect_anchor {
            if let Some(detector) = &self.detector {
                if let Err(e) = session.detect_anchor(detector, self.config.anchor_span_secs) {
                    warn!(
                        "❌ OCR detection failed for {:?}: {} (set start/end manually)",
                        session.path(),
                        e
                    );
                }
            }
        }

        let index = self.sessions.len();
        info!("➕ Added video #{}: {:?}", index, session.path());
        self.sessions.push(session);
        Ok(index)
    }

    pub fn add_image_sequence(&mut self, dir: &Path) -> Result<usize, SessionError> {
        let source = ImageSequenceSource::open(dir, self.config.sequence_fps)?;
        self.add_video(dir, Box::new(source))
    }

    pub fn remove_video(&mut self, index: usize) -> Option<VideoSession> {
        if index >= self.sessions.len() {
            return None;
        }
        let session = self.sessions.remove(index);
        info!("🗑️ Deleted video: {:?}", session.path());
        Some(session)
    }

    /// Re-runs OCR on one video's first frame.
    pub fn detect_anchor(&mut self, index: usize) -> Result<TimeAnchor, SessionError> {
        let detector = self.detector.as_ref().ok_or(SessionError::NoDetector)?;
        let session = self
            .sessions
            .get_mut(index)
            .ok_or(SessionError::NoSuchVideo(index))?;
        session.detect_anchor(detector, self.config.anchor_span_secs)
    }

    pub fn sessions(&self) -> &[VideoSession] {
        &self.sessions
    }

    pub fn session(&self, index: usize) -> Option<&VideoSession> {
        self.sessions.get(index)
    }

    pub fn session_mut(&mut self, index: usize) -> Option<&mut VideoSession> {
        self.sessions.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Starts every video; returns each one's tick interval.
    pub fn play_all(&mut self) -> Vec<Duration> {
        info!("[Play All]");
        self.sessions.iter_mut().map(|s| s.play()).collect()
    }

    pub fn pause_all(&mut self) {
        info!("[Pause All]");
        self.sessions.iter_mut().for_each(|s| s.pause());
    }

    /// Advances every playing video by one frame. Returns how many moved.
    pub fn tick_all(&mut self) -> usize {
        self.sessions
            .par_iter_mut()
            .map(|s| match s.tick() {
                Ok(advanced) => advanced,
                Err(e) => {
                    warn!("Playback stopped for {:?}: {}", s.path(), e);
                    false
                }
            })
            .filter(|advanced| *advanced)
            .count()
    }

    /// Current frame of every video after the step, in video order.
    pub fn fast_forward_all(&mut self, steps: u64) -> Vec<u64> {
        info!("[Fast-forward All] +{} frames", steps);
        self.step_all(|s| s.fast_forward(steps))
    }

    pub fn rewind_all(&mut self, steps: u64) -> Vec<u64> {
        info!("[Rewind All] -{} frames", steps);
        self.step_all(|s| s.rewind(steps))
    }

    fn step_all<F>(&mut self, step: F) -> Vec<u64>
    where
        F: Fn(&mut VideoSession) -> Result<u64, SessionError> + Sync,
    {
        self.sessions
            .par_iter_mut()
            .map(|s| {
                if let Err(e) = step(s) {
                    warn!("Navigation failed for {:?}: {}", s.path(), e);
                }
                s.current_frame()
            })
            .collect()
    }

    /// `times` rounds of: screenshot every video, then advance each by
    /// `interval` frames.
    pub fn snapshot_all(&mut self, times: u32, interval: u64) -> SnapshotReport {
        info!(
            "[Multi-screenshot] times={}, interval={} frames",
            times, interval
        );
        let mut report = SnapshotReport::default();

        for _ in 0..times {
            let round: Vec<Option<PathBuf>> = self
                .sessions
                .par_iter_mut()
                .map(|s| {
                    let saved = match s.screenshot() {
                        Ok(path) => Some(path),
                        Err(e) => {
                            warn!("Screenshot failed for {:?}: {}", s.path(), e);
                            None
                        }
                    };
                    if let Err(e) = s.fast_forward(interval) {
                        warn!("Navigation failed for {:?}: {}", s.path(), e);
                    }
                    saved
                })
                .collect();

            for saved in round {
                match saved {
                    Some(path) => report.saved.push(path),
                    None => report.failures += 1,
                }
            }
        }

        info!(
            "[Multi-screenshot finished] {} times, interval={} frames, saved={}",
            times,
            interval,
            report.saved.len()
        );
        report
    }

    /// Moves every anchored video to the frame matching `target`.
    pub fn jump_all_to_time(&mut self, target: &Timestamp) -> JumpReport {
        let outcomes: Vec<JumpOutcome> = self
            .sessions
            .par_iter_mut()
            .map(|s| {
                if s.anchor().is_none() {
                    return JumpOutcome::Skipped;
                }
                match s.jump_to_time(target) {
                    Ok(frame) => JumpOutcome::Jumped(frame),
                    Err(e) => {
                        warn!("Global jump failed for {:?}: {}", s.path(), e);
                        JumpOutcome::Failed
                    }
                }
            })
            .collect();

        let mut report = JumpReport::default();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                JumpOutcome::Jumped(frame) => report.jumped.push((index, frame)),
                JumpOutcome::Skipped => report.skipped.push(index),
                JumpOutcome::Failed => report.failed.push(index),
            }
        }

        info!("Global jump executed for time: {}", target);
        report
    }

    pub fn jump_all_to_time_str(&mut self, target: &str) -> Result<JumpReport, ClockError> {
        let target = Timestamp::parse(target)?;
        Ok(self.jump_all_to_time(&target))
    }
}

impl Default for MultiVideoPlayer {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}
