use super::error::VideoError;
use image::{GrayImage, Luma, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 时钟区域（像素坐标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersection with a `width` x `height` image as `(x, y, w, h)`.
    pub fn clamp_to(&self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let x0 = self.x.min(width);
        let y0 = self.y.min(height);
        let x1 = self.x.saturating_add(self.width).min(width);
        let y1 = self.y.saturating_add(self.height).min(height);
        (x0, y0, x1 - x0, y1 - y0)
    }
}

impl Default for Roi {
    /// Top-left corner where most recorders draw their clock.
    fn default() -> Self {
        Self::new(0, 0, 250, 40)
    }
}

/// 帧数据结构
#[derive(Debug, Clone)]
pub struct Frame {
    pub frame_number: u64,
    pub image: RgbImage,
}

impl Frame {
    pub fn new(frame_number: u64, image: RgbImage) -> Self {
        Self {
            frame_number,
            image,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Crops `roi`, converts to luma and binarizes: `> threshold` becomes
    /// white, everything else black. An ROI outside the frame yields an
    /// empty image.
    pub fn clock_region(&self, roi: &Roi, threshold: u8) -> GrayImage {
        let (x, y, w, h) = roi.clamp_to(self.width(), self.height());
        let mut region = GrayImage::new(w, h);

        for (rx, ry, out) in region.enumerate_pixels_mut() {
            let p = self.image.get_pixel(x + rx, y + ry);
            let luma = (p[0] as u32 * 299 + p[1] as u32 * 587 + p[2] as u32 * 114) / 1000;
            *out = Luma([if luma > threshold as u32 { 255 } else { 0 }]);
        }

        region
    }

    /// Writes the frame as PNG, creating parent directories.
    pub fn save_png(&self, path: &Path) -> Result<(), VideoError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.image
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn split_frame() -> Frame {
        // left half white, right half dark gray
        let image = RgbImage::from_fn(20, 10, |x, _| {
            if x < 10 {
                Rgb([255, 255, 255])
            } else {
                Rgb([60, 60, 60])
            }
        });
        Frame::new(7, image)
    }

    #[test]
    fn test_roi_clamp() {
        assert_eq!(Roi::new(0, 0, 250, 40).clamp_to(100, 20), (0, 0, 100, 20));
        assert_eq!(Roi::new(5, 5, 10, 10).clamp_to(100, 100), (5, 5, 10, 10));
        assert_eq!(Roi::new(200, 0, 10, 10).clamp_to(100, 100), (100, 0, 0, 10));
        assert_eq!(
            Roi::new(u32::MAX, u32::MAX, u32::MAX, 1).clamp_to(8, 8),
            (8, 8, 0, 0)
        );
    }

    #[test]
    fn test_clock_region_binarizes() {
        let frame = split_frame();
        let region = frame.clock_region(&Roi::new(5, 0, 10, 4), 128);

        assert_eq!(region.dimensions(), (10, 4));
        assert_eq!(region.get_pixel(0, 0)[0], 255);
        assert_eq!(region.get_pixel(4, 3)[0], 255);
        assert_eq!(region.get_pixel(5, 0)[0], 0);
        assert_eq!(region.get_pixel(9, 3)[0], 0);
    }

    #[test]
    fn test_clock_region_threshold_is_strict() {
        let frame = Frame::new(0, RgbImage::from_pixel(4, 4, Rgb([128, 128, 128])));
        let region = frame.clock_region(&Roi::default(), 128);
        assert!(region.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn test_clock_region_outside_frame_is_empty() {
        let frame = split_frame();
        let region = frame.clock_region(&Roi::new(50, 50, 10, 10), 128);
        assert_eq!(region.width() * region.height(), 0);
    }

    #[test]
    fn test_save_png_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("shot.png");
        split_frame().save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (20, 10));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([255, 255, 255]));
    }
}
