use axum::{Json, extract::State};
use axum_macros::debug_handler;
use chrono::Utc;

use std::sync::Arc;

use crate::{
    dto::{
        ApiResponse, BatchTranslateRequest, BatchTranslateResponse, BatchTranslationItem,
        DetectLanguageRequest, DetectLanguageResponse, ErrorResponse, LanguagesResponse,
        SpeechTranslationRequest, SpeechTranslationResponse, TranslateTextRequest,
        TranslateTextResponse,
    },
    error::AppError,
    handlers::rest::{AppState, extract::AppJson},
    translation::languages,
};

#[utoipa::path(
    post,
    path = "/api/translate/text",
    request_body = TranslateTextRequest,
    responses(
        (status = 200, description = "Translated text", body = TranslateTextResponse),
        (status = 400, description = "Text is missing", body = ErrorResponse)
    ),
    tag = "translate"
)]
#[debug_handler]
pub async fn translate_text(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<TranslateTextRequest>,
) -> Result<Json<ApiResponse<TranslateTextResponse>>, AppError> {
    let result = state
        .translation
        .translate_required(
            &payload.text,
            &payload.source_lang,
            &payload.target_lang,
            "Text is required for translation",
        )
        .await?;

    Ok(Json(ApiResponse::new(TranslateTextResponse {
        translation_length: result.translated_text.chars().count(),
        original_text: payload.text,
        translated_text: result.translated_text,
        source_language: result.source_language,
        detected_language: result.detected_language,
        target_language: result.target_language,
        timestamp: Utc::now(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/translate/speech",
    request_body = SpeechTranslationRequest,
    responses(
        (status = 200, description = "Translated transcript", body = SpeechTranslationResponse),
        (status = 400, description = "Transcript is missing", body = ErrorResponse)
    ),
    tag = "translate"
)]
#[debug_handler]
pub async fn translate_speech(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<SpeechTranslationRequest>,
) -> Result<Json<ApiResponse<SpeechTranslationResponse>>, AppError> {
    let result = state
        .translation
        .translate_required(
            &payload.recognized_text,
            &payload.source_lang,
            &payload.target_lang,
            "Recognized text is required for translation",
        )
        .await?;

    Ok(Json(ApiResponse::new(SpeechTranslationResponse {
        recognized_text: payload.recognized_text,
        translated_text: result.translated_text,
        source_language: result.source_language,
        detected_language: result.detected_language,
        target_language: result.target_language,
        timestamp: Utc::now(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/translate/batch",
    request_body = BatchTranslateRequest,
    responses(
        (status = 200, description = "Translations in input order", body = BatchTranslateResponse),
        (status = 400, description = "Texts array is missing", body = ErrorResponse)
    ),
    tag = "translate"
)]
#[debug_handler]
pub async fn translate_batch(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<BatchTranslateRequest>,
) -> Result<Json<ApiResponse<BatchTranslateResponse>>, AppError> {
    let results = state
        .translation
        .translate_batch(
            payload.texts.as_deref(),
            &payload.source_lang,
            &payload.target_lang,
        )
        .await?;

    let translations = results
        .into_iter()
        .map(|(original, result)| BatchTranslationItem {
            original,
            translated: result.translated_text,
            source_language: result.source_language,
            detected_language: result.detected_language,
            target_language: result.target_language,
        })
        .collect();

    Ok(Json(ApiResponse::new(BatchTranslateResponse {
        translations,
        timestamp: Utc::now(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/translate/detect-language",
    request_body = DetectLanguageRequest,
    responses(
        (status = 200, description = "Detected language", body = DetectLanguageResponse),
        (status = 400, description = "Text is missing", body = ErrorResponse)
    ),
    tag = "translate"
)]
#[debug_handler]
pub async fn detect_language(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<DetectLanguageRequest>,
) -> Result<Json<ApiResponse<DetectLanguageResponse>>, AppError> {
    let detection = state.translation.detect(&payload.text)?;

    Ok(Json(ApiResponse::new(DetectLanguageResponse {
        text: payload.text,
        detected_language: detection.language.to_string(),
        language_name: languages::language_name(detection.language)
            .unwrap_or("Unknown")
            .to_string(),
        confidence: detection.confidence,
        timestamp: Utc::now(),
    })))
}

#[utoipa::path(
    get,
    path = "/api/translate/languages",
    responses(
        (status = 200, description = "Supported language codes and names", body = LanguagesResponse)
    ),
    tag = "translate"
)]
#[debug_handler]
pub async fn get_languages() -> Json<LanguagesResponse> {
    let data = languages::supported_languages();

    Json(LanguagesResponse {
        success: true,
        count: data.len(),
        data,
    })
}
