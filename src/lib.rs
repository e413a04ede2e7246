//! PDF Analysis Server Library
//!
//! Extracts positioned words from uploaded PDFs and rasterizes pages that
//! carry too little text. The server binary is in main.rs.
//!
//! # Modules
//!
//! - `analysis`: Per-page policy, response types, collaborator traits
//! - `mupdf`: MuPDF-backed word extraction and page rendering
//! - `routes`: HTTP surface (`/analyze`, `/split`, `/health`)

pub mod analysis;
pub mod config;
pub mod error;
pub mod mupdf;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;
