use super::engine::OcrEngine;
use super::error::OcrError;
use crate::core::config::OcrConfig;
use image::{GrayImage, ImageFormat};
use log::debug;
use std::process::{Command, Stdio};

/// Runs the `tesseract` command-line tool on a temporary PNG.
pub struct TesseractEngine {
    command: String,
    psm: Option<u8>,
}

impl TesseractEngine {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            psm: None,
        }
    }

    /// Page segmentation mode, e.g. 7 for a single text line.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.tesseract_cmd.clone(),
            psm: config.psm,
        }
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("tesseract")
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize_text(&self, image: &GrayImage) -> Result<String, OcrError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(OcrError::EmptyRegion);
        }

        let file = tempfile::Builder::new()
            .prefix("frame_clock_")
            .suffix(".png")
            .tempfile()?;
        image.save_with_format(file.path(), ImageFormat::Png)?;

        let mut cmd = Command::new(&self.command);
        cmd.arg(file.path()).arg("stdout");
        if let Some(psm) = self.psm {
            cmd.arg("--psm").arg(psm.to_string());
        }
        debug!("Running OCR: {:?}", cmd);

        let output = cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).output()?;
        if !output.status.success() {
            return Err(OcrError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_region_rejected() {
        let engine = TesseractEngine::default();
        assert!(matches!(
            engine.recognize_text(&GrayImage::new(0, 40)),
            Err(OcrError::EmptyRegion)
        ));
    }

    #[test]
    fn test_missing_binary_is_io_error() {
        let engine = TesseractEngine::new("frame-clock-no-such-ocr-binary");
        assert!(matches!(
            engine.recognize_text(&GrayImage::new(8, 8)),
            Err(OcrError::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_is_engine_error() {
        let engine = TesseractEngine::new("false").with_psm(7);
        assert!(matches!(
            engine.recognize_text(&GrayImage::new(8, 8)),
            Err(OcrError::Engine(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = OcrConfig {
            tesseract_cmd: "/opt/tess/bin/tesseract".to_string(),
            psm: Some(7),
            ..Default::default()
        };
        let engine = TesseractEngine::from_config(&config);
        assert_eq!(engine.command, "/opt/tess/bin/tesseract");
        assert_eq!(engine.psm, Some(7));
    }
}
