use image::RgbImage;
use mupdf::{Colorspace, Document, Matrix, TextPageFlags};

use expiryscan_core::{BackendError, PageRenderer, PdfTextBackend};

/// MuPDF-based implementation of [`PdfTextBackend`] and [`PageRenderer`].
///
/// This crate is the sole AGPL island — it isolates the mupdf dependency
/// (which is AGPL-3.0) so that non-PDF code paths do not transitively
/// depend on it. It serves as the primary text-layer reader and as the
/// rasterizer behind the OCR fallback.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextBackend for MupdfBackend {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let document =
            Document::from_bytes(bytes, "pdf").map_err(|e| BackendError::Open(e.to_string()))?;

        let mut pages_text = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::Extraction(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::Extraction(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::Extraction(e.to_string()))?;

            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    let line_text: String = line
                        .chars()
                        .map(|c| c.char().unwrap_or('\u{FFFD}'))
                        .collect();
                    page_text.push_str(&line_text);
                    page_text.push('\n');
                }
            }
            pages_text.push(page_text);
        }

        Ok(pages_text.join("\n"))
    }
}

impl PageRenderer for MupdfBackend {
    fn render_pages(&self, bytes: &[u8], dpi: u32) -> Result<Vec<RgbImage>, BackendError> {
        let document =
            Document::from_bytes(bytes, "pdf").map_err(|e| BackendError::Open(e.to_string()))?;

        // PDF user space is 72 units per inch.
        let zoom = dpi as f32 / 72.0;
        let matrix = Matrix::new_scale(zoom, zoom);

        let mut pages = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::Render(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::Render(e.to_string()))?;
            let pixmap = page
                .to_pixmap(&matrix, &Colorspace::device_rgb(), 0.0, true)
                .map_err(|e| BackendError::Render(e.to_string()))?;

            let width = pixmap.width();
            let height = pixmap.height();
            let samples = pixmap.samples().to_vec();

            let img = RgbImage::from_raw(width, height, samples).ok_or_else(|| {
                BackendError::Render(format!(
                    "pixmap buffer does not match {width}x{height} RGB dimensions"
                ))
            })?;
            pages.push(img);
        }

        Ok(pages)
    }
}
