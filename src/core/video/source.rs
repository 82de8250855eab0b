use super::error::VideoError;
use image::RgbImage;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// 帧来源：解码器由外部提供，这里只关心帧数、帧率和按索引取帧
pub trait FrameSource: Send {
    fn total_frames(&self) -> u64;

    fn frame_rate(&self) -> f64;

    fn read_frame(&mut self, index: u64) -> Result<RgbImage, VideoError>;
}

const SEQUENCE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// A directory of still images played back as a video, one file per frame in
/// file-name order.
pub struct ImageSequenceSource {
    frames: Vec<PathBuf>,
    fps: f64,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path, fps: f64) -> Result<Self, VideoError> {
        let mut frames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| SEQUENCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if path.is_file() && is_image {
                frames.push(path);
            }
        }

        if frames.is_empty() {
            return Err(VideoError::EmptySource(dir.to_path_buf()));
        }
        frames.sort();

        info!(
            "📂 Image sequence opened: {:?}, frames={}, fps={}",
            dir,
            frames.len(),
            fps
        );
        Ok(Self { frames, fps })
    }
}

impl FrameSource for ImageSequenceSource {
    fn total_frames(&self) -> u64 {
        self.frames.len() as u64
    }

    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn read_frame(&mut self, index: u64) -> Result<RgbImage, VideoError> {
        let path = usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .ok_or(VideoError::ReadFailure { index })?;
        debug!("Reading frame {} from {:?}", index, path);
        Ok(image::open(path)?.to_rgb8())
    }
}

/// In-memory frames, for tests and for callers that decode up front.
pub struct MemoryFrameSource {
    frames: Vec<RgbImage>,
    fps: f64,
    failing: Vec<u64>,
}

impl MemoryFrameSource {
    pub fn new(frames: Vec<RgbImage>, fps: f64) -> Self {
        Self {
            frames,
            fps,
            failing: Vec::new(),
        }
    }

    /// `count` frames whose red channel encodes the frame index (mod 256).
    pub fn numbered(count: u64, width: u32, height: u32, fps: f64) -> Self {
        let frames = (0..count)
            .map(|i| RgbImage::from_pixel(width, height, image::Rgb([(i % 256) as u8, 0, 0])))
            .collect();
        Self::new(frames, fps)
    }

    /// Reads of these indices fail with `ReadFailure`.
    pub fn with_failing_frames(mut self, failing: Vec<u64>) -> Self {
        self.failing = failing;
        self
    }
}

impl FrameSource for MemoryFrameSource {
    fn total_frames(&self) -> u64 {
        self.frames.len() as u64
    }

    fn frame_rate(&self) -> f64 {
        self.fps
    }

    fn read_frame(&mut self, index: u64) -> Result<RgbImage, VideoError> {
        if self.failing.contains(&index) {
            return Err(VideoError::ReadFailure { index });
        }
        usize::try_from(index)
            .ok()
            .and_then(|i| self.frames.get(i))
            .cloned()
            .ok_or(VideoError::ReadFailure { index })
    }
}
