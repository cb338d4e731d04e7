use axum::{
    Json,
    body::Bytes,
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    dto::{
        ApiResponse, ErrorResponse, PdfExtractResponse, PdfTranslateResponse, PdfUploadForm,
        default_source_lang, default_target_lang,
    },
    error::AppError,
    handlers::rest::AppState,
    pdf,
};

const PREVIEW_CHARS: usize = 500;

/// Fields of a PDF upload form after validation.
struct PdfUpload {
    bytes: Vec<u8>,
    source_lang: String,
    target_lang: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<PdfUpload, AppError> {
    let mut bytes: Option<Bytes> = None;
    let mut source_lang = None;
    let mut target_lang = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        match name.as_str() {
            "pdf" => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;

                if !pdf::is_pdf(content_type.as_deref(), &data) {
                    return Err(AppError::UnsupportedMedia(
                        "Only PDF files are allowed".to_string(),
                    ));
                }
                bytes = Some(data);
            }
            "sourceLang" => source_lang = Some(field.text().await?),
            "targetLang" => target_lang = Some(field.text().await?),
            other => tracing::debug!("Ignoring multipart field '{}'", other),
        }
    }

    let bytes = bytes.ok_or_else(|| AppError::Validation("No PDF file uploaded".to_string()))?;

    Ok(PdfUpload {
        bytes: bytes.to_vec(),
        source_lang: source_lang
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_source_lang),
        target_lang: target_lang
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(default_target_lang),
    })
}

/// `application/pdf` response offered as a download named `filename`.
pub fn pdf_attachment(bytes: Vec<u8>, filename: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[utoipa::path(
    post,
    path = "/api/pdf/extract",
    request_body(content = PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Extracted text and document info", body = PdfExtractResponse),
        (status = 400, description = "Missing or invalid PDF", body = ErrorResponse)
    ),
    tag = "pdf"
)]
#[debug_handler]
pub async fn extract_text(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PdfExtractResponse>>, AppError> {
    let upload = read_upload(multipart).await?;
    let extracted = state.pdf.extract(upload.bytes).await?;

    Ok(Json(ApiResponse::new(PdfExtractResponse {
        text_length: extracted.text.chars().count(),
        original_text: extracted.text,
        pages: extracted.pages,
        metadata: extracted.metadata,
    })))
}

#[utoipa::path(
    post,
    path = "/api/pdf/translate",
    request_body(content = PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Translated document text", body = PdfTranslateResponse),
        (status = 400, description = "Missing or invalid PDF", body = ErrorResponse)
    ),
    tag = "pdf"
)]
#[debug_handler]
pub async fn translate_pdf(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<PdfTranslateResponse>>, AppError> {
    let upload = read_upload(multipart).await?;
    let translated = state
        .pdf
        .translate(upload.bytes, &upload.source_lang, &upload.target_lang)
        .await?;

    let original = translated.original;
    let result = translated.translation;

    Ok(Json(ApiResponse::new(PdfTranslateResponse {
        original_pages: original.pages,
        original_text_length: original.text.chars().count(),
        text_preview: preview(&original.text),
        translated_text: result.translated_text,
        source_language: result.source_language,
        detected_language: result.detected_language,
        target_language: result.target_language,
    })))
}

#[utoipa::path(
    post,
    path = "/api/pdf/translate-download",
    request_body(content = PdfUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Translated PDF", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Missing or invalid PDF", body = ErrorResponse),
        (status = 500, description = "PDF creation failed", body = ErrorResponse)
    ),
    tag = "pdf"
)]
#[debug_handler]
pub async fn translate_and_download(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let upload = read_upload(multipart).await?;
    let bytes = state
        .pdf
        .translate_to_pdf(upload.bytes, &upload.source_lang, &upload.target_lang)
        .await?;

    Ok(pdf_attachment(bytes, "translated-document.pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_long_text() {
        let long = "é".repeat(PREVIEW_CHARS + 10);
        let cut = preview(&long);

        assert_eq!(cut.chars().count(), PREVIEW_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(preview("short"), "short");
    }
}
