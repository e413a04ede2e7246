//! Analysis service
//!
//! Runs the per-page policy: every page contributes its words to the result,
//! and pages with fewer than [`MIN_WORDS_PER_PAGE`] words are additionally
//! rasterized so downstream OCR can work on them.
//!
//! All methods are synchronous and CPU-bound; callers on the async runtime
//! should run them through `spawn_blocking`.

use std::collections::BTreeMap;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use super::traits::{PageRasterizer, TextExtractor};
use super::types::{AnalyzeResponse, DebugLog, RasterOutcome, SplitResponse, TextBlock};
use crate::error::{AppError, Result};

/// Pages with fewer words than this are treated as image-only
pub const MIN_WORDS_PER_PAGE: usize = 5;

/// Reject anything not named `*.pdf`
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.ends_with(".pdf") {
        Ok(())
    } else {
        Err(AppError::InvalidInput("File must be a PDF".to_string()))
    }
}

/// PDF analysis over a text extractor and a page rasterizer
#[derive(Clone)]
pub struct AnalysisService {
    extractor: Arc<dyn TextExtractor>,
    rasterizer: Arc<dyn PageRasterizer>,
}

impl AnalysisService {
    pub fn new(extractor: Arc<dyn TextExtractor>, rasterizer: Arc<dyn PageRasterizer>) -> Self {
        Self {
            extractor,
            rasterizer,
        }
    }

    /// Extract positioned words, rasterizing low-text pages
    pub fn analyze(&self, data: &[u8], filename: &str) -> Result<AnalyzeResponse> {
        let mut log = DebugLog::new();
        log.push(format!("Processing file: {}", filename));

        validate_filename(filename)?;

        log.push(format!("Received file size: {} bytes", data.len()));

        let pages = self.extractor.extract_words(data)?;
        log.push(format!("PDF opened. Pages: {}", pages.len()));

        let mut results = Vec::new();
        let mut images_map = BTreeMap::new();

        for (index, words) in pages.into_iter().enumerate() {
            let page_number = index + 1;
            log.push(format!("Page {} words found: {}", page_number, words.len()));

            if words.len() < MIN_WORDS_PER_PAGE {
                log.push(format!(
                    "Page {} has low text content ({} words). Converting to image...",
                    page_number,
                    words.len()
                ));

                match self.rasterize_page(data, page_number) {
                    RasterOutcome::Converted(encoded) => {
                        images_map.insert(page_number.to_string(), encoded);
                        log.push(format!("Page {} converted to image.", page_number));
                    }
                    RasterOutcome::Failed(reason) => {
                        tracing::warn!("Rasterization of page {} failed: {}", page_number, reason);
                        log.push(format!(
                            "Failed to convert page {} to image: {}",
                            page_number, reason
                        ));
                    }
                }
            }

            results.extend(
                words
                    .into_iter()
                    .map(|word| TextBlock::from_word(word, page_number)),
            );
        }

        log.push(format!("Total results: {}", results.len()));
        log.push(format!("Total images: {}", images_map.len()));

        tracing::info!(
            "Analyzed '{}': {} words, {} page images",
            filename,
            results.len(),
            images_map.len()
        );

        Ok(AnalyzeResponse {
            results,
            images: Vec::new(),
            images_map,
            debug_logs: log.into_lines(),
        })
    }

    /// Count the pages of the document
    pub fn split(&self, data: &[u8], filename: &str) -> Result<SplitResponse> {
        validate_filename(filename)?;

        let page_count = self.extractor.page_count(data)?;
        tracing::info!("Split '{}': {} pages", filename, page_count);

        Ok(SplitResponse { page_count })
    }

    fn rasterize_page(&self, data: &[u8], page_number: usize) -> RasterOutcome {
        match self.rasterizer.rasterize(data, page_number) {
            Ok(jpeg) if jpeg.is_empty() => {
                RasterOutcome::Failed("rasterizer returned no image".to_string())
            }
            Ok(jpeg) => RasterOutcome::Converted(BASE64.encode(jpeg)),
            Err(e) => RasterOutcome::Failed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::analysis::traits::{ExtractError, RasterError};
    use crate::analysis::types::{PageWords, Word};

    fn words(count: usize) -> PageWords {
        (0..count)
            .map(|i| Word {
                text: format!("w{}", i),
                x0: i as f64 * 20.0,
                top: 10.0,
                x1: i as f64 * 20.0 + 15.0,
                bottom: 22.0,
            })
            .collect()
    }

    struct FakeExtractor {
        pages: Option<Vec<PageWords>>,
    }

    impl TextExtractor for FakeExtractor {
        fn page_count(&self, _data: &[u8]) -> std::result::Result<usize, ExtractError> {
            self.pages
                .as_ref()
                .map(Vec::len)
                .ok_or_else(|| ExtractError::Open("no objects found".into()))
        }

        fn extract_words(&self, _data: &[u8]) -> std::result::Result<Vec<PageWords>, ExtractError> {
            self.pages
                .clone()
                .ok_or_else(|| ExtractError::Open("no objects found".into()))
        }
    }

    #[derive(Default)]
    struct FakeRasterizer {
        failing_pages: Vec<usize>,
        calls: Mutex<Vec<usize>>,
    }

    impl PageRasterizer for FakeRasterizer {
        fn rasterize(&self, _data: &[u8], page: usize) -> std::result::Result<Vec<u8>, RasterError> {
            self.calls.lock().unwrap().push(page);
            if self.failing_pages.contains(&page) {
                Err(RasterError::Render("unsupported colorspace".into()))
            } else {
                Ok(vec![0xFF, 0xD8, 0xFF, 0xD9])
            }
        }
    }

    fn service(pages: Option<Vec<PageWords>>, rasterizer: Arc<FakeRasterizer>) -> AnalysisService {
        AnalysisService::new(Arc::new(FakeExtractor { pages }), rasterizer)
    }

    #[test]
    fn test_validate_filename() {
        assert!(validate_filename("report.pdf").is_ok());
        assert!(matches!(validate_filename("doc.txt"), Err(AppError::InvalidInput(_))));
        assert!(validate_filename("REPORT.PDF").is_err());
        assert!(validate_filename("").is_err());
    }

    #[test]
    fn test_low_text_pages_are_rasterized() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(Some(vec![words(12), words(2), words(5), words(4)]), rasterizer.clone());

        let response = svc.analyze(b"%PDF", "scan.pdf").unwrap();

        assert_eq!(*rasterizer.calls.lock().unwrap(), vec![2, 4]);
        assert_eq!(
            response.images_map.keys().collect::<Vec<_>>(),
            vec!["2", "4"]
        );
        assert_eq!(response.images_map["2"], BASE64.encode([0xFF, 0xD8, 0xFF, 0xD9]));
        assert!(response.images.is_empty());
    }

    #[test]
    fn test_words_kept_in_page_order_even_for_rasterized_pages() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(Some(vec![words(6), words(3)]), rasterizer);

        let response = svc.analyze(b"%PDF", "mixed.pdf").unwrap();

        assert_eq!(response.results.len(), 9);
        assert!(response.results[..6].iter().all(|b| b.page_number == 1));
        assert!(response.results[6..].iter().all(|b| b.page_number == 2));
        assert_eq!(response.results[6].text, "w0");
        assert_eq!(response.results[8].text, "w2");
    }

    #[test]
    fn test_raster_failure_is_logged_not_propagated() {
        let rasterizer = Arc::new(FakeRasterizer {
            failing_pages: vec![1],
            ..Default::default()
        });
        let svc = service(Some(vec![words(0), words(1)]), rasterizer);

        let response = svc.analyze(b"%PDF", "scan.pdf").unwrap();

        assert!(!response.images_map.contains_key("1"));
        assert!(response.images_map.contains_key("2"));
        assert!(response
            .debug_logs
            .contains(&"Failed to convert page 1 to image: Failed to render page: unsupported colorspace".to_string()));
        assert!(response
            .debug_logs
            .contains(&"Page 2 converted to image.".to_string()));
    }

    #[test]
    fn test_debug_log_sequence() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(Some(vec![words(5), words(0)]), rasterizer);

        let response = svc.analyze(&[0u8; 42], "a.pdf").unwrap();

        assert_eq!(
            response.debug_logs,
            vec![
                "Processing file: a.pdf",
                "Received file size: 42 bytes",
                "PDF opened. Pages: 2",
                "Page 1 words found: 5",
                "Page 2 words found: 0",
                "Page 2 has low text content (0 words). Converting to image...",
                "Page 2 converted to image.",
                "Total results: 5",
                "Total images: 1",
            ]
        );
    }

    #[test]
    fn test_extraction_failure_aborts_request() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(None, rasterizer.clone());

        let err = svc.analyze(b"garbage", "broken.pdf").unwrap_err();

        assert!(matches!(err, AppError::Processing(_)));
        assert!(rasterizer.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_invalid_extension_skips_extraction() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(None, rasterizer);

        assert!(matches!(
            svc.analyze(b"%PDF", "doc.txt"),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            svc.split(b"%PDF", "doc.txt"),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_split_counts_pages() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(Some(vec![words(1), words(9), words(0)]), rasterizer);

        assert_eq!(svc.split(b"%PDF", "a.pdf").unwrap().page_count, 3);
    }

    #[test]
    fn test_empty_document() {
        let rasterizer = Arc::new(FakeRasterizer::default());
        let svc = service(Some(Vec::new()), rasterizer);

        let response = svc.analyze(b"%PDF", "empty.pdf").unwrap();
        assert!(response.results.is_empty());
        assert!(response.images_map.is_empty());
        assert_eq!(svc.split(b"%PDF", "empty.pdf").unwrap().page_count, 0);
    }
}
