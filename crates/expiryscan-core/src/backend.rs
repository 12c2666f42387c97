use image::RgbImage;

use crate::BackendError;

/// Trait for PDF text-layer extraction backends.
///
/// Implementors provide the low-level text extraction step; the acquisition
/// pipeline (fallback chaining, OCR escape hatch) lives in the ingest crate.
pub trait PdfTextBackend: Send + Sync {
    /// Extract the full text content of a PDF held in memory.
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError>;
}

/// Trait for rasterizing PDF pages, used by the OCR fallback path.
pub trait PageRenderer: Send + Sync {
    /// Render every page of the PDF to an RGB image at the given resolution.
    fn render_pages(&self, bytes: &[u8], dpi: u32) -> Result<Vec<RgbImage>, BackendError>;
}

/// Trait for OCR engines.
///
/// Input is an encoded image (PNG or JPEG bytes); output is whatever text the
/// engine recognized, possibly empty.
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, image: &[u8]) -> Result<String, BackendError>;
}
