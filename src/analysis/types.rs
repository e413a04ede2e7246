//! Analysis request/response types

use std::collections::BTreeMap;

use serde::Serialize;

/// A single word with its bounding box, in page space (points, origin top-left)
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    pub text: String,
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

/// All words found on one page, in extraction order
pub type PageWords = Vec<Word>;

/// A positioned token in the analysis response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub text: String,
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
    /// 1-indexed page number
    pub page_number: usize,
}

impl TextBlock {
    pub fn from_word(word: Word, page_number: usize) -> Self {
        Self {
            text: word.text,
            x0: word.x0,
            top: word.top,
            x1: word.x1,
            bottom: word.bottom,
            page_number,
        }
    }
}

/// Result of `POST /analyze`
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalyzeResponse {
    /// Words of every page, page order first then extraction order
    pub results: Vec<TextBlock>,
    /// Always empty; page images are returned through `images_map`
    pub images: Vec<String>,
    /// Page number (as string) -> base64 JPEG, only for low-text pages
    pub images_map: BTreeMap<String, String>,
    pub debug_logs: Vec<String>,
}

/// Result of `POST /split`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SplitResponse {
    pub page_count: usize,
}

/// Outcome of the rasterization fallback for one page
///
/// Never propagated as an error: a failed render only shows up in the logs.
#[derive(Debug)]
pub enum RasterOutcome {
    /// Base64-encoded JPEG
    Converted(String),
    Failed(String),
}

/// Per-request debug log accumulator
#[derive(Debug, Default)]
pub struct DebugLog {
    lines: Vec<String>,
}

impl DebugLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        tracing::debug!("{}", line);
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
