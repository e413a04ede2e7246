//! Word Extraction
//!
//! Builds word tokens out of MuPDF structured text. MuPDF reports single
//! characters with quads, grouped into lines; words are formed per line by
//! splitting on whitespace and on horizontal gaps wider than [`X_TOLERANCE`].

use mupdf::{Page, TextPageOptions};

use crate::analysis::{PageWords, Word};

/// Maximum horizontal gap (points) between two glyphs of the same word
pub const X_TOLERANCE: f64 = 3.0;

/// A single character with its box, in page space (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub ch: char,
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl Glyph {
    fn from_char(ch: char, quad: &mupdf::Quad) -> Self {
        // Quad corners: ul, ur, ll, lr. MuPDF stext coordinates are already top-down.
        Self {
            ch,
            x0: f64::from(quad.ul.x.min(quad.ll.x)),
            top: f64::from(quad.ul.y.min(quad.ur.y)),
            x1: f64::from(quad.ur.x.max(quad.lr.x)),
            bottom: f64::from(quad.ll.y.max(quad.lr.y)),
        }
    }
}

/// Accumulates glyphs until a word boundary is hit
#[derive(Default)]
struct WordBuilder {
    current: Option<Word>,
}

impl WordBuilder {
    fn push(&mut self, glyph: Glyph, out: &mut PageWords) {
        if glyph.ch.is_whitespace() {
            self.flush(out);
            return;
        }

        let gap_too_wide = self
            .current
            .as_ref()
            .is_some_and(|word| glyph.x0 - word.x1 > X_TOLERANCE);
        if gap_too_wide {
            self.flush(out);
        }

        match &mut self.current {
            Some(word) => {
                word.text.push(glyph.ch);
                word.x0 = word.x0.min(glyph.x0);
                word.top = word.top.min(glyph.top);
                word.x1 = word.x1.max(glyph.x1);
                word.bottom = word.bottom.max(glyph.bottom);
            }
            None => {
                self.current = Some(Word {
                    text: glyph.ch.to_string(),
                    x0: glyph.x0,
                    top: glyph.top,
                    x1: glyph.x1,
                    bottom: glyph.bottom,
                });
            }
        }
    }

    fn flush(&mut self, out: &mut PageWords) {
        if let Some(word) = self.current.take() {
            out.push(word);
        }
    }
}

/// Group one line of glyphs into words, appending to `out`
pub fn group_line<I>(glyphs: I, out: &mut PageWords)
where
    I: IntoIterator<Item = Glyph>,
{
    let mut builder = WordBuilder::default();
    for glyph in glyphs {
        builder.push(glyph, out);
    }
    builder.flush(out);
}

/// Extract all words of a page, in reading order as reported by MuPDF
pub fn extract_page_words(page: &Page) -> Result<PageWords, mupdf::Error> {
    let text_page = page.to_text_page(TextPageOptions::empty())?;
    let mut words = Vec::new();

    for block in text_page.blocks() {
        for line in block.lines() {
            let glyphs = line
                .chars()
                .filter_map(|ch| ch.char().map(|c| Glyph::from_char(c, &ch.quad())));
            group_line(glyphs, &mut words);
        }
    }

    Ok(words)
}
