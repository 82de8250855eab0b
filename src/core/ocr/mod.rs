//! OCR：外部识别引擎 + 时钟识别
//!
//! The engine itself is a collaborator behind [`OcrEngine`]. [`ClockDetector`]
//! prepares the clock region, asks the engine for text and pulls a timestamp
//! out of it.

pub mod detector;
pub mod engine;
pub mod error;
pub mod tesseract;

pub use detector::ClockDetector;
pub use engine::{MockOcrEngine, OcrEngine};
pub use error::OcrError;
pub use tesseract::TesseractEngine;
