pub mod clock;
pub mod config;
pub mod ocr;
pub mod session;
pub mod video;
