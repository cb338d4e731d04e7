use axum::{Json, extract::State, response::Response};
use axum_macros::debug_handler;
use chrono::Utc;

use std::sync::Arc;

use crate::{
    dto::{
        ApiResponse, CreatePdfRequest, ErrorResponse, TextToPdfRequest, TranslatePreviewResponse,
    },
    error::AppError,
    handlers::rest::{AppState, extract::AppJson, pdf::pdf_attachment},
};

/// Strips path separators, quotes and control characters so the name is
/// safe inside a `Content-Disposition` header.
fn sanitize_filename(name: Option<&str>, fallback: &str) -> String {
    let cleaned: String = name
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '"' | '/' | '\\'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        fallback.to_string()
    } else {
        cleaned.to_string()
    }
}

#[utoipa::path(
    post,
    path = "/api/text-pdf/translate-download",
    request_body = TextToPdfRequest,
    responses(
        (status = 200, description = "PDF of the translated text", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Text is missing", body = ErrorResponse),
        (status = 500, description = "PDF creation failed", body = ErrorResponse)
    ),
    tag = "text-pdf"
)]
#[debug_handler]
pub async fn translate_to_pdf(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<TextToPdfRequest>,
) -> Result<Response, AppError> {
    let filename = sanitize_filename(payload.filename.as_deref(), "translated-document");
    let bytes = state
        .pdf
        .text_to_pdf(
            &payload.text,
            &payload.source_lang,
            &payload.target_lang,
            &filename,
        )
        .await?;

    Ok(pdf_attachment(bytes, &format!("{filename}.pdf")))
}

#[utoipa::path(
    post,
    path = "/api/text-pdf/create-pdf",
    request_body = CreatePdfRequest,
    responses(
        (status = 200, description = "PDF of the given text", content_type = "application/pdf", body = Vec<u8>),
        (status = 400, description = "Text is missing", body = ErrorResponse),
        (status = 500, description = "PDF creation failed", body = ErrorResponse)
    ),
    tag = "text-pdf"
)]
#[debug_handler]
pub async fn create_pdf(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreatePdfRequest>,
) -> Result<Response, AppError> {
    let filename = sanitize_filename(payload.filename.as_deref(), "document");
    let bytes = state.pdf.create_pdf(&payload.text, &filename).await?;

    Ok(pdf_attachment(bytes, &format!("{filename}.pdf")))
}

#[utoipa::path(
    post,
    path = "/api/text-pdf/translate-preview",
    request_body = TextToPdfRequest,
    responses(
        (status = 200, description = "Translation shown before downloading it as PDF", body = TranslatePreviewResponse),
        (status = 400, description = "Text is missing", body = ErrorResponse)
    ),
    tag = "text-pdf"
)]
#[debug_handler]
pub async fn translate_preview(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<TextToPdfRequest>,
) -> Result<Json<ApiResponse<TranslatePreviewResponse>>, AppError> {
    let result = state
        .translation
        .translate_required(
            &payload.text,
            &payload.source_lang,
            &payload.target_lang,
            "Text is required for translation",
        )
        .await?;

    Ok(Json(ApiResponse::new(TranslatePreviewResponse {
        text_length: payload.text.chars().count(),
        translated_length: result.translated_text.chars().count(),
        original_text: payload.text,
        translated_text: result.translated_text,
        source_language: result.source_language,
        detected_language: result.detected_language,
        target_language: result.target_language,
        timestamp: Utc::now(),
        pdf_download_url: "/api/text-pdf/translate-download".to_string(),
    })))
}
