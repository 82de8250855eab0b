use super::error::OcrError;
use image::GrayImage;

pub trait OcrEngine: Send + Sync {
    fn recognize_text(&self, image: &GrayImage) -> Result<String, OcrError>;
}

/// 测试用 OCR 引擎
pub struct MockOcrEngine {
    respond: Box<dyn Fn(&GrayImage) -> Result<String, OcrError> + Send + Sync>,
}

impl MockOcrEngine {
    /// Always recognizes `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            respond: Box::new(move |_: &GrayImage| Ok::<_, OcrError>(text.clone())),
        }
    }

    pub fn with_fn<F>(respond: F) -> Self
    where
        F: Fn(&GrayImage) -> Result<String, OcrError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
        }
    }
}

impl OcrEngine for MockOcrEngine {
    fn recognize_text(&self, image: &GrayImage) -> Result<String, OcrError> {
        (self.respond)(image)
    }
}
