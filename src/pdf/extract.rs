use lopdf::{Dictionary, Document, Object};

use crate::{models::PdfMetadata, pdf::PdfError};

#[derive(Debug, Clone)]
pub struct ExtractedPdf {
    pub text: String,
    pub pages: usize,
    pub metadata: PdfMetadata,
}

/// True if the declared content type or the leading bytes say PDF.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains("application/pdf") || head.starts_with(b"%PDF-")
}

pub fn extract_text(bytes: &[u8]) -> Result<ExtractedPdf, PdfError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(PdfError::Unparseable("missing %PDF- header".to_string()));
    }

    let document =
        Document::load_mem(bytes).map_err(|e| PdfError::Unparseable(e.to_string()))?;
    let pages = document.get_pages().len();
    let metadata = read_metadata(&document);

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PdfError::Unparseable(e.to_string()))?;

    tracing::debug!("Extracted {} chars from {} page(s)", text.len(), pages);

    Ok(ExtractedPdf {
        text,
        pages,
        metadata,
    })
}

fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    match document.trailer.get(b"Info").ok()? {
        Object::Reference(id) => document.get_object(*id).ok()?.as_dict().ok(),
        Object::Dictionary(dict) => Some(dict),
        _ => None,
    }
}

/// PDF text strings are UTF-16BE when they start with a BOM, otherwise
/// single-byte PDFDocEncoding (read as Latin-1).
fn decode_text_string(bytes: &[u8]) -> String {
    bytes.strip_prefix(&[0xFE, 0xFF]).map_or_else(
        || bytes.iter().copied().map(char::from).collect(),
        |utf16| {
            let units: Vec<u16> = utf16
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
                .collect();
            String::from_utf16_lossy(&units)
        },
    )
}

fn text_entry(info: &Dictionary, key: &[u8]) -> Option<String> {
    match info.get(key).ok()? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
    .filter(|value| !value.trim().is_empty())
}

fn read_metadata(document: &Document) -> PdfMetadata {
    let Some(info) = info_dictionary(document) else {
        return PdfMetadata::default();
    };

    PdfMetadata {
        title: text_entry(info, b"Title"),
        author: text_entry(info, b"Author"),
        subject: text_entry(info, b"Subject"),
        creator: text_entry(info, b"Creator"),
        producer: text_entry(info, b"Producer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_payloads() {
        assert!(matches!(
            extract_text(b"definitely not a pdf"),
            Err(PdfError::Unparseable(_))
        ));
    }

    #[test]
    fn sniffs_pdf_by_type_or_magic() {
        assert!(is_pdf(Some("Application/PDF"), b""));
        assert!(is_pdf(None, b"%PDF-1.7"));
        assert!(!is_pdf(Some("text/plain"), b"hello"));
    }

    #[test]
    fn decodes_utf16_and_latin1_strings() {
        assert_eq!(decode_text_string(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0xE9]), "Hé");
        assert_eq!(decode_text_string(&[0x43, 0x61, 0x66, 0xE9]), "Café");
    }
}
