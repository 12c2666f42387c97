use std::path::PathBuf;

/// Resolution used when rasterizing PDF pages for the OCR fallback.
pub const DEFAULT_RENDER_DPI: u32 = 200;

/// Configuration passed into the extractor at construction time.
///
/// This replaces process-global knobs (OCR binary location, logger setup):
/// the extractor holds no mutable state beyond what is captured here, so
/// concurrent callers can share one instance.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Tesseract language code (e.g. "eng").
    pub ocr_lang: String,
    /// Directory containing traineddata files. `None` lets the engine use
    /// its compiled-in default search path.
    pub tessdata_dir: Option<PathBuf>,
    /// Resolution for PDF page rasterization before OCR.
    pub render_dpi: u32,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            ocr_lang: "eng".to_string(),
            tessdata_dir: None,
            render_dpi: DEFAULT_RENDER_DPI,
        }
    }
}

impl ExtractorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ocr_lang(mut self, lang: impl Into<String>) -> Self {
        self.ocr_lang = lang.into();
        self
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }

    pub fn with_render_dpi(mut self, dpi: u32) -> Self {
        self.render_dpi = dpi;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ExtractorConfig::default();
        assert_eq!(config.ocr_lang, "eng");
        assert_eq!(config.render_dpi, DEFAULT_RENDER_DPI);
        assert!(config.tessdata_dir.is_none());
    }

    #[test]
    fn builder_overrides() {
        let config = ExtractorConfig::new()
            .with_ocr_lang("deu")
            .with_tessdata_dir("/opt/tessdata")
            .with_render_dpi(300);
        assert_eq!(config.ocr_lang, "deu");
        assert_eq!(config.render_dpi, 300);
        assert_eq!(
            config.tessdata_dir.as_deref(),
            Some(std::path::Path::new("/opt/tessdata"))
        );
    }
}
