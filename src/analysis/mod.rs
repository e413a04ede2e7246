//! PDF analysis module
//!
//! Word extraction with a rasterization fallback for pages that carry
//! too little text to be useful.

mod service;
mod traits;
mod types;

pub use service::{validate_filename, AnalysisService, MIN_WORDS_PER_PAGE};
pub use traits::{ExtractError, PageRasterizer, RasterError, TextExtractor};
pub use types::{AnalyzeResponse, PageWords, SplitResponse, TextBlock, Word};
