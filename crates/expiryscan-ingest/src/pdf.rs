//! The PDF acquisition strategy.
//!
//! Text-layer readers are tried in order; when none produces usable text
//! (a scanned PDF with no text layer), every page is rasterized at a fixed
//! resolution, the page images are stacked vertically into one composite,
//! and OCR runs once over the composite.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use expiryscan_core::{BackendError, PdfTextBackend};

use crate::{AcquireError, ExpiryExtractor};

/// Pure-Rust text-layer reader, used after the primary backend in the
/// fallback chain (and as the only reader when the `pdf` feature is off).
#[derive(Debug, Default)]
pub struct PdfExtractBackend;

impl PdfExtractBackend {
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextBackend for PdfExtractBackend {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| BackendError::Extraction(e.to_string()))
    }
}

impl ExpiryExtractor {
    pub(crate) fn acquire_pdf_text(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        if !bytes.starts_with(b"%PDF-") {
            tracing::debug!("input lacks %PDF- magic, attempting extraction anyway");
        }

        for (index, backend) in self.pdf_backends.iter().enumerate() {
            match backend.extract_text(bytes) {
                Ok(text) if !text.trim().is_empty() => return Ok(text),
                Ok(_) => tracing::debug!(backend = index, "text layer empty"),
                Err(err) => {
                    tracing::warn!(backend = index, error = %err, "text-layer extraction failed");
                }
            }
        }

        tracing::debug!("no usable text layer, falling back to OCR");
        self.ocr_rendered_pages(bytes)
    }

    /// Rasterize all pages, stack them into one composite, OCR the result.
    fn ocr_rendered_pages(&self, bytes: &[u8]) -> Result<String, AcquireError> {
        let renderer = self.renderer.as_ref().ok_or(AcquireError::NoOcrSupport)?;
        let ocr = self.ocr.as_ref().ok_or(AcquireError::NoOcrSupport)?;

        let pages = renderer.render_pages(bytes, self.config.render_dpi)?;
        let composite = composite_pages(&pages).ok_or(AcquireError::NoText)?;
        tracing::debug!(
            pages = pages.len(),
            width = composite.width(),
            height = composite.height(),
            "running OCR on composite page image"
        );

        let png = encode_png(&composite)?;
        Ok(ocr.recognize(&png)?)
    }
}

/// Stack page images top to bottom: width is the widest page, height the sum
/// of page heights, unused area filled white. `None` for an empty page set.
fn composite_pages(pages: &[RgbImage]) -> Option<RgbImage> {
    let width = pages.iter().map(|p| p.width()).max()?;
    let height: u32 = pages.iter().map(|p| p.height()).sum();

    let mut canvas = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    let mut offset: i64 = 0;
    for page in pages {
        image::imageops::replace(&mut canvas, page, 0, offset);
        offset += i64::from(page.height());
    }
    Some(canvas)
}

fn encode_png(img: &RgbImage) -> Result<Vec<u8>, AcquireError> {
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AcquireError::Backend(BackendError::Render(format!("PNG encode: {e}"))))?;
    Ok(png)
}
