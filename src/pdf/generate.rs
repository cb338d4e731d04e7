use chrono::Utc;
use lopdf::{
    Document, Object, ObjectId, Stream, StringFormat,
    content::{Content, Operation},
    dictionary,
};

use crate::{models::PdfMetadata, pdf::PdfError};

const DEFAULT_AUTHOR: &str = "Translation Gateway";

// US Letter with one inch margins, text confined to a 500x700 box.
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;
const BOX_WIDTH: i64 = 500;
const BOX_HEIGHT: i64 = 700;
const FONT_SIZE: i64 = 12;
const LEADING: i64 = 14;
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const LINES_PER_PAGE: usize = (BOX_HEIGHT / LEADING) as usize;

/// Helvetica advance widths for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, 556, 556, 556,
    556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, 1015, 667, 667, 722, 722, 667,
    611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667,
    667, 611, 278, 278, 278, 469, 556, 333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500,
    222, 833, 556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Information dictionary of a generated document.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl DocumentInfo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: None,
        }
    }

    /// Metadata for the translation of a document described by `original`.
    pub fn translated_from(original: &PdfMetadata) -> Self {
        Self {
            title: original
                .title
                .as_ref()
                .map(|title| format!("Translated - {title}")),
            author: original.author.clone(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn char_width(c: char) -> f64 {
    let units = match u32::from(c) {
        code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize],
        _ => 556,
    };
    f64::from(units) * FONT_SIZE as f64 / 1000.0
}

fn text_width(text: &str) -> f64 {
    text.chars().map(char_width).sum()
}

/// Greedy word wrap. Words wider than the box are split by character.
fn wrap_lines(text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if text_width(&candidate) <= max_width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            for c in word.chars() {
                if !line.is_empty() && text_width(&line) + char_width(c) > max_width {
                    lines.push(std::mem::take(&mut line));
                }
                line.push(c);
            }
        }

        lines.push(line);
    }

    lines
}

/// Maps to WinAnsiEncoding; anything the standard fonts cannot show
/// becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(c)).unwrap_or(b'?'),
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '\t' => b' ',
            _ => b'?',
        })
        .collect()
}

/// Info dictionary strings: literal when ASCII, UTF-16BE with BOM otherwise.
fn text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::string_literal(value);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn page_content(lines: &[String]) -> Content {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
        Operation::new(
            "Td",
            vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - FONT_SIZE).into()],
        ),
    ];

    for (idx, line) in lines.iter().enumerate() {
        if idx > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-LEADING).into()]));
        }
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(line))],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

fn info_dictionary(info: &DocumentInfo) -> lopdf::Dictionary {
    let mut dict = dictionary! {
        "Author" => text_string(info.author.as_deref().unwrap_or(DEFAULT_AUTHOR)),
        "Producer" => Object::string_literal(DEFAULT_AUTHOR),
        "CreationDate" => Object::string_literal(
            Utc::now().format("D:%Y%m%d%H%M%SZ").to_string()
        ),
    };

    if let Some(title) = &info.title {
        dict.set("Title", text_string(title));
    }

    dict
}

fn add_page(
    doc: &mut Document,
    pages_id: ObjectId,
    resources_id: ObjectId,
    lines: &[String],
) -> Result<ObjectId, PdfError> {
    let content = page_content(lines)
        .encode()
        .map_err(|e| PdfError::Generation(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    let media_box: Vec<Object> = vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    }))
}

/// Lays `text` out in Helvetica 12pt inside a 500x700pt box, continuing
/// on further pages when the box is full.
pub fn create_pdf(text: &str, info: &DocumentInfo) -> Result<Vec<u8>, PdfError> {
    #[allow(clippy::cast_precision_loss)]
    let lines = wrap_lines(text, BOX_WIDTH as f64);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for chunk in lines.chunks(LINES_PER_PAGE) {
        kids.push(add_page(&mut doc, pages_id, resources_id, chunk)?.into());
    }
    if kids.is_empty() {
        kids.push(add_page(&mut doc, pages_id, resources_id, &[])?.into());
    }

    let page_count = i64::try_from(kids.len()).unwrap_or(i64::MAX);
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(info_dictionary(info));

    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfError::Generation(e.to_string()))?;

    Ok(buffer)
}
