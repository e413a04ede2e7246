//! Application state management

use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::mupdf::{MuPdfExtractor, MuPdfRasterizer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    analysis: AnalysisService,
}

impl AppState {
    /// Create state backed by MuPDF
    pub fn new(config: Config) -> Self {
        let rasterizer = MuPdfRasterizer::new(config.render.dpi, config.render.jpeg_quality);
        let analysis = AnalysisService::new(Arc::new(MuPdfExtractor), Arc::new(rasterizer));
        Self::with_service(config, analysis)
    }

    /// Create state around an existing analysis service
    pub fn with_service(config: Config, analysis: AnalysisService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, analysis }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the analysis service
    pub fn analysis(&self) -> &AnalysisService {
        &self.inner.analysis
    }
}
