//! Collaborator traits
//!
//! The analysis policy only talks to these two seams. The MuPDF-backed
//! implementations live in `crate::mupdf`.

use thiserror::Error;

use super::types::PageWords;

/// Text extraction errors; any of these fails the whole request
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Open(String),
    #[error("{0}")]
    Page(String),
}

/// Rasterization errors; logged and swallowed by the caller
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Page {0} not found (document has {1} pages)")]
    PageNotFound(usize, usize),
    #[error("Failed to render page: {0}")]
    Render(String),
    #[error("Image encoding error: {0}")]
    Encode(String),
}

/// Word-level text layout extractor
pub trait TextExtractor: Send + Sync {
    /// Number of pages in the document
    fn page_count(&self, data: &[u8]) -> Result<usize, ExtractError>;

    /// Words of every page, index 0 = page 1
    fn extract_words(&self, data: &[u8]) -> Result<Vec<PageWords>, ExtractError>;
}

/// Single-page renderer producing JPEG bytes
pub trait PageRasterizer: Send + Sync {
    /// Render the 1-indexed `page` of `data`
    fn rasterize(&self, data: &[u8], page: usize) -> Result<Vec<u8>, RasterError>;
}
