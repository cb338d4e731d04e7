use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::{Note, PdfMetadata};

pub fn default_source_lang() -> String {
    "auto".to_string()
}

pub fn default_target_lang() -> String {
    "en".to_string()
}

/////////////////////////////////////////////////////////////////////
// Envelope

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

/////////////////////////////////////////////////////////////////////
// Translation

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextRequest {
    /// Text to translate
    #[serde(default)]
    pub text: String,
    /// Source language code, `auto` to detect
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    /// Target language code
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslateTextResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub target_language: String,
    pub translation_length: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeechTranslationRequest {
    /// Transcript produced by the client's speech recognizer
    #[serde(default)]
    pub recognized_text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpeechTranslationResponse {
    pub recognized_text: String,
    pub translated_text: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub target_language: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslateRequest {
    pub texts: Option<Vec<String>>,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchTranslationItem {
    pub original: String,
    pub translated: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub target_language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BatchTranslateResponse {
    pub translations: Vec<BatchTranslationItem>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetectLanguageRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DetectLanguageResponse {
    pub text: String,
    pub detected_language: String,
    pub language_name: String,
    /// Share of tokens matching the detected language's stop words
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LanguagesResponse {
    pub success: bool,
    pub data: std::collections::BTreeMap<String, String>,
    pub count: usize,
}

/////////////////////////////////////////////////////////////////////
// PDF

/// Multipart form accepted by the PDF endpoints.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct PdfUploadForm {
    /// PDF document, at most 10MB
    #[schema(value_type = String, format = Binary)]
    pub pdf: Vec<u8>,
    pub source_lang: Option<String>,
    pub target_lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfExtractResponse {
    pub original_text: String,
    pub pages: usize,
    pub text_length: usize,
    pub metadata: PdfMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PdfTranslateResponse {
    pub original_pages: usize,
    pub original_text_length: usize,
    pub translated_text: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub target_language: String,
    pub text_preview: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TextToPdfRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default = "default_source_lang")]
    pub source_lang: String,
    #[serde(default = "default_target_lang")]
    pub target_lang: String,
    /// Download name without the `.pdf` extension
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePdfRequest {
    #[serde(default)]
    pub text: String,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslatePreviewResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    pub target_language: String,
    pub text_length: usize,
    pub translated_length: usize,
    pub timestamp: DateTime<Utc>,
    pub pdf_download_url: String,
}

/////////////////////////////////////////////////////////////////////
// Notes

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Note title, generated when absent
    pub title: Option<String>,
    /// Note content
    pub content: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub translation_data: Option<serde_json::Value>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub translation_data: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub note: Note,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListNotesQuery {
    /// 1-based page number
    pub page: Option<usize>,
    /// Page size
    pub limit: Option<usize>,
    /// Case-insensitive filter over title, content and tags
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchNotesQuery {
    /// Case-insensitive filter over title and content
    pub query: Option<String>,
    /// Comma-separated tags, a note matches when it has any of them
    pub tags: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotesPageResponse {
    pub notes: Vec<Note>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotesSearchResponse {
    pub notes: Vec<Note>,
    pub total: usize,
    pub query: String,
    pub tags: String,
}
