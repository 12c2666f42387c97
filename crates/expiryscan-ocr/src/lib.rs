//! Tesseract-backed OCR engine.
//!
//! Requires the Tesseract shared library at build time and traineddata at
//! runtime. Locating traineddata is a deployment concern; the search
//! directory and language are plain configuration here, never process-global
//! state.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;
use tesseract::Tesseract;

use expiryscan_core::{BackendError, ExtractorConfig, OcrEngine};

/// Tesseract implementation of [`OcrEngine`].
pub struct TesseractOcr {
    lang: String,
    tessdata_dir: Option<PathBuf>,
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self {
            lang: "eng".to_string(),
            tessdata_dir: None,
        }
    }
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from extractor configuration.
    pub fn from_config(config: &ExtractorConfig) -> Self {
        Self {
            lang: config.ocr_lang.clone(),
            tessdata_dir: config.tessdata_dir.clone(),
        }
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    pub fn with_tessdata_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tessdata_dir = Some(dir.into());
        self
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &[u8]) -> Result<String, BackendError> {
        // The Tesseract C API reads images from disk, so spool the encoded
        // bytes through a temp file.
        let mut temp = NamedTempFile::new().map_err(|e| BackendError::Ocr(e.to_string()))?;
        temp.write_all(image)
            .map_err(|e| BackendError::Ocr(e.to_string()))?;
        let image_path = temp
            .path()
            .to_str()
            .ok_or_else(|| BackendError::Ocr("temp file path is not valid UTF-8".to_string()))?;

        let datapath = self.tessdata_dir.as_deref().and_then(|p| p.to_str());

        tracing::debug!(lang = %self.lang, bytes = image.len(), "running tesseract");

        let text = Tesseract::new(datapath, Some(&self.lang))
            .map_err(|e| BackendError::Ocr(format!("tesseract init: {e}")))?
            .set_image(image_path)
            .map_err(|e| BackendError::Ocr(format!("tesseract set image: {e}")))?
            .get_text()
            .map_err(|e| BackendError::Ocr(format!("tesseract get text: {e}")))?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_copies_settings() {
        let config = ExtractorConfig::new()
            .with_ocr_lang("spa")
            .with_tessdata_dir("/usr/share/tessdata");
        let ocr = TesseractOcr::from_config(&config);
        assert_eq!(ocr.lang, "spa");
        assert_eq!(
            ocr.tessdata_dir.as_deref(),
            Some(std::path::Path::new("/usr/share/tessdata"))
        );
    }

    #[test]
    fn builder_overrides() {
        let ocr = TesseractOcr::new().with_lang("fra");
        assert_eq!(ocr.lang, "fra");
        assert!(ocr.tessdata_dir.is_none());
    }
}
