//! MuPDF-backed collaborators
//!
//! MuPDF's `fz_context` is not thread-safe, so nothing here holds a
//! document across calls: every operation opens a fresh `Document` from the
//! request's bytes and drops it before returning. Both types are plain
//! configuration and can be shared freely between requests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pdf_analysis_server::mupdf::{MuPdfExtractor, MuPdfRasterizer};
//!
//! let pages = MuPdfExtractor.extract_words(&pdf_bytes)?;
//! let jpeg = MuPdfRasterizer::new(200, 75).rasterize(&pdf_bytes, 1)?;
//! ```

mod render;
mod words;

use mupdf::Document;

use self::render::render_page_jpeg;
use self::words::extract_page_words;

use crate::analysis::{ExtractError, PageRasterizer, PageWords, RasterError, TextExtractor};

const PDF_MIME: &str = "application/pdf";

fn open_document(data: &[u8]) -> Result<Document, mupdf::Error> {
    Document::from_bytes(data, PDF_MIME)
}

/// Word extractor over MuPDF structured text
#[derive(Debug, Clone, Copy, Default)]
pub struct MuPdfExtractor;

impl TextExtractor for MuPdfExtractor {
    fn page_count(&self, data: &[u8]) -> Result<usize, ExtractError> {
        let doc = open_document(data).map_err(|e| ExtractError::Open(e.to_string()))?;
        let count = doc
            .page_count()
            .map_err(|e| ExtractError::Open(e.to_string()))?;
        Ok(count.max(0) as usize)
    }

    fn extract_words(&self, data: &[u8]) -> Result<Vec<PageWords>, ExtractError> {
        let doc = open_document(data).map_err(|e| ExtractError::Open(e.to_string()))?;
        let page_count = doc
            .page_count()
            .map_err(|e| ExtractError::Open(e.to_string()))?;

        (0..page_count)
            .map(|index| {
                let page = doc
                    .load_page(index)
                    .map_err(|e| ExtractError::Page(format!("page {}: {}", index + 1, e)))?;
                extract_page_words(&page)
                    .map_err(|e| ExtractError::Page(format!("page {}: {}", index + 1, e)))
            })
            .collect()
    }
}

/// Single-page JPEG renderer
#[derive(Debug, Clone, Copy)]
pub struct MuPdfRasterizer {
    dpi: u32,
    jpeg_quality: u8,
}

impl MuPdfRasterizer {
    pub fn new(dpi: u32, jpeg_quality: u8) -> Self {
        Self { dpi, jpeg_quality }
    }
}

impl PageRasterizer for MuPdfRasterizer {
    fn rasterize(&self, data: &[u8], page: usize) -> Result<Vec<u8>, RasterError> {
        let doc = open_document(data).map_err(|e| RasterError::Render(e.to_string()))?;
        render_page_jpeg(&doc, page, self.dpi, self.jpeg_quality)
    }
}
