//! PDF text extraction and generation.
//!
//! Parsing goes through `pdf-extract` for text and `lopdf` for page count and
//! the information dictionary; generated documents are written with `lopdf`
//! using the standard Helvetica font.

pub mod extract;
pub mod generate;

pub use extract::{ExtractedPdf, extract_text, is_pdf};
pub use generate::{DocumentInfo, create_pdf};

#[derive(Debug, thiserror::Error)]
pub enum PdfError {
    #[error("PDF extraction failed: {0}")]
    Unparseable(String),

    #[error("PDF creation failed: {0}")]
    Generation(String),
}
