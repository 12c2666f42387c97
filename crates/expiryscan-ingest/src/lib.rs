//! Format dispatch and text acquisition.
//!
//! Routes an in-memory document to the right acquisition strategy based on
//! its filename extension, then funnels whatever text comes out through the
//! pattern-scan → parse → select chain in `expiryscan-core`.

use thiserror::Error;

use expiryscan_core::{OcrEngine, PageRenderer, PdfTextBackend};

mod pdf;

pub use expiryscan_core::{DateCandidate, ExtractorConfig, Outcome};
pub use pdf::PdfExtractBackend;

/// Extensions the dispatcher recognizes, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "png", "jpg", "jpeg", "doc", "docx"];

/// The acquisition strategy family a file routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Image,
    WordDocument,
}

impl DocumentKind {
    /// Classify a file by its extension. `None` means unsupported format.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = std::path::Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "png" | "jpg" | "jpeg" => Some(DocumentKind::Image),
            "doc" | "docx" => Some(DocumentKind::WordDocument),
            _ => None,
        }
    }
}

/// Why a text acquisition strategy failed.
///
/// These never escape [`ExpiryExtractor::extract`] — the dispatcher logs
/// them and collapses everything into [`Outcome::NotFound`]. Callers that
/// need the taxonomy use [`ExpiryExtractor::acquire_text`] instead.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("unsupported file extension")]
    UnsupportedFormat,
    #[error("document produced no text")]
    NoText,
    #[error(transparent)]
    Backend(#[from] expiryscan_core::BackendError),
    #[error("word document error: {0}")]
    Docx(#[from] expiryscan_docx::DocxError),
    #[error("OCR support not compiled in (enable the `pdf` and `ocr` features of expiryscan-ingest)")]
    NoOcrSupport,
}

/// The expiry date extractor.
///
/// Holds immutable configuration and the acquisition backends; every call is
/// independent, so one instance can be shared by concurrent callers. Each
/// call blocks for as long as extraction takes — hosts with latency budgets
/// run it on a worker and impose their own timeout.
pub struct ExpiryExtractor {
    config: ExtractorConfig,
    /// Text-layer readers, tried in order; first usable output wins.
    pdf_backends: Vec<Box<dyn PdfTextBackend>>,
    renderer: Option<Box<dyn PageRenderer>>,
    ocr: Option<Box<dyn OcrEngine>>,
}

impl ExpiryExtractor {
    /// Build an extractor with the default backends available under the
    /// enabled cargo features.
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            pdf_backends: default_pdf_backends(),
            renderer: default_renderer(),
            ocr: default_ocr(&config),
            config,
        }
    }

    /// Replace the text-layer backend chain (primary first).
    pub fn with_pdf_backends(mut self, backends: Vec<Box<dyn PdfTextBackend>>) -> Self {
        self.pdf_backends = backends;
        self
    }

    /// Replace the page renderer used by the PDF-OCR fallback.
    pub fn with_renderer(mut self, renderer: Box<dyn PageRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Replace the OCR engine.
    pub fn with_ocr(mut self, ocr: Box<dyn OcrEngine>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Extract the most likely expiry date from a document.
    ///
    /// The only two outcomes are a resolved date or not-found; acquisition
    /// and parse failures are logged and absorbed here.
    pub fn extract(&self, bytes: &[u8], filename: &str) -> Outcome {
        match self.acquire_text(bytes, filename) {
            Ok(text) => match expiryscan_core::extract_date_from_text(&text) {
                Some(candidate) => {
                    tracing::info!(
                        file = filename,
                        date = %candidate.date,
                        matched = %candidate.matched,
                        "resolved expiry date"
                    );
                    Outcome::Resolved(candidate.date)
                }
                None => {
                    tracing::info!(file = filename, "text extracted but no date found");
                    Outcome::NotFound
                }
            },
            Err(err) => {
                tracing::warn!(file = filename, error = %err, "text acquisition failed");
                Outcome::NotFound
            }
        }
    }

    /// Run the acquisition strategy for `filename` and return the raw text.
    ///
    /// Exposed so callers can distinguish "could not extract text" from
    /// "extracted text but found no date" when they care.
    pub fn acquire_text(&self, bytes: &[u8], filename: &str) -> Result<String, AcquireError> {
        let kind =
            DocumentKind::from_filename(filename).ok_or(AcquireError::UnsupportedFormat)?;

        let text = match kind {
            DocumentKind::Pdf => self.acquire_pdf_text(bytes)?,
            DocumentKind::Image => self.acquire_image_text(bytes)?,
            DocumentKind::WordDocument => expiryscan_docx::extract_text(bytes)?,
        };

        if text.trim().is_empty() {
            return Err(AcquireError::NoText);
        }
        Ok(text)
    }

    fn acquire_image_text(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        let ocr = self.ocr.as_ref().ok_or(AcquireError::NoOcrSupport)?;
        Ok(ocr.recognize(bytes)?)
    }
}

#[cfg(feature = "pdf")]
fn default_pdf_backends() -> Vec<Box<dyn PdfTextBackend>> {
    vec![
        Box::new(expiryscan_pdf_mupdf::MupdfBackend::new()),
        Box::new(pdf::PdfExtractBackend::new()),
    ]
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_backends() -> Vec<Box<dyn PdfTextBackend>> {
    vec![Box::new(pdf::PdfExtractBackend::new())]
}

#[cfg(feature = "pdf")]
fn default_renderer() -> Option<Box<dyn PageRenderer>> {
    Some(Box::new(expiryscan_pdf_mupdf::MupdfBackend::new()))
}

#[cfg(not(feature = "pdf"))]
fn default_renderer() -> Option<Box<dyn PageRenderer>> {
    None
}

#[cfg(feature = "ocr")]
fn default_ocr(config: &ExtractorConfig) -> Option<Box<dyn OcrEngine>> {
    Some(Box::new(expiryscan_ocr::TesseractOcr::from_config(config)))
}

#[cfg(not(feature = "ocr"))]
fn default_ocr(_config: &ExtractorConfig) -> Option<Box<dyn OcrEngine>> {
    None
}
