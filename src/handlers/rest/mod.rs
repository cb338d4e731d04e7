mod extract;
mod notes;
mod pdf;
mod text_pdf;
mod translate;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    dto::{
        BatchTranslateRequest, BatchTranslateResponse, BatchTranslationItem, CreateNoteRequest,
        CreatePdfRequest, DetectLanguageRequest, DetectLanguageResponse, ErrorResponse,
        LanguagesResponse, MessageResponse, NoteResponse, NotesPageResponse, NotesSearchResponse,
        PdfExtractResponse, PdfTranslateResponse, PdfUploadForm, SpeechTranslationRequest,
        SpeechTranslationResponse, StatusResponse, TextToPdfRequest, TranslatePreviewResponse,
        TranslateTextRequest, TranslateTextResponse, UpdateNoteRequest,
    },
    models::{Note, PdfMetadata},
    repository::Repository,
    service::{NoteService, PdfService, TranslationService},
    translation::ProviderChain,
};

pub struct AppState {
    pub notes: NoteService,
    pub translation: Arc<TranslationService>,
    pub pdf: PdfService,
}

impl AppState {
    pub fn new(chain: ProviderChain) -> Self {
        let repo = Arc::new(tokio::sync::Mutex::new(Repository::new()));
        let translation = Arc::new(TranslationService::new(chain));

        Self {
            notes: NoteService::new(repo),
            pdf: PdfService::new(translation.clone()),
            translation,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        root,
        translate::translate_text,
        translate::translate_speech,
        translate::translate_batch,
        translate::detect_language,
        translate::get_languages,
        pdf::extract_text,
        pdf::translate_pdf,
        pdf::translate_and_download,
        text_pdf::translate_to_pdf,
        text_pdf::create_pdf,
        text_pdf::translate_preview,
        notes::create_note,
        notes::get_all_notes,
        notes::search_notes,
        notes::get_one_note,
        notes::update_note,
        notes::delete_note
    ),
    components(schemas(
        StatusResponse,
        ErrorResponse,
        TranslateTextRequest,
        TranslateTextResponse,
        SpeechTranslationRequest,
        SpeechTranslationResponse,
        BatchTranslateRequest,
        BatchTranslateResponse,
        BatchTranslationItem,
        DetectLanguageRequest,
        DetectLanguageResponse,
        LanguagesResponse,
        PdfUploadForm,
        PdfMetadata,
        PdfExtractResponse,
        PdfTranslateResponse,
        TextToPdfRequest,
        CreatePdfRequest,
        TranslatePreviewResponse,
        Note,
        CreateNoteRequest,
        UpdateNoteRequest,
        NoteResponse,
        MessageResponse,
        NotesPageResponse,
        NotesSearchResponse
    )),
    tags(
        (name = "translate", description = "Text, speech transcript and batch translation"),
        (name = "pdf", description = "PDF upload, extraction and translation"),
        (name = "text-pdf", description = "Text to PDF generation"),
        (name = "notes", description = "Notes management API")
    )
)]
pub struct ApiDoc;

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = StatusResponse)
    )
)]
async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ready".to_string(),
        message: "Welcome to Translation API - Text, Speech & PDF Translation".to_string(),
    })
}

fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/translate", post(translate::translate_text))
        .route("/translate/text", post(translate::translate_text))
        .route("/translate/speech", post(translate::translate_speech))
        .route("/translate/batch", post(translate::translate_batch))
        .route(
            "/translate/detect-language",
            post(translate::detect_language),
        )
        .route("/translate/languages", get(translate::get_languages))
        .route("/pdf/extract", post(pdf::extract_text))
        .route("/pdf/translate", post(pdf::translate_pdf))
        .route("/pdf/translate-download", post(pdf::translate_and_download))
        .route(
            "/text-pdf/translate-download",
            post(text_pdf::translate_to_pdf),
        )
        .route("/text-pdf/create-pdf", post(text_pdf::create_pdf))
        .route(
            "/text-pdf/translate-preview",
            post(text_pdf::translate_preview),
        )
        .route(
            "/notes",
            post(notes::create_note).get(notes::get_all_notes),
        )
        .route("/notes/search", get(notes::search_notes))
        .route(
            "/notes/{id}",
            get(notes::get_one_note)
                .put(notes::update_note)
                .delete(notes::delete_note),
        )
}

pub fn router(state: Arc<AppState>, max_upload_size: usize) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/api", api_router())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_upload_size))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::{
        pdf::{DocumentInfo, create_pdf},
        translation::providers::MockProvider,
    };

    const BOUNDARY: &str = "gateway-test-boundary";

    fn app() -> Router {
        app_with_limit(10 * 1024 * 1024)
    }

    fn app_with_limit(limit: usize) -> Router {
        let chain = ProviderChain::new(vec![Box::new(MockProvider::new(Duration::ZERO))]);
        router(Arc::new(AppState::new(chain)), limit)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn multipart(file: &[u8], content_type: &str, target_lang: &str) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"targetLang\"\r\n\r\n{target_lang}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"pdf\"; filename=\"doc.pdf\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method(Method::POST)
            .uri("/api/pdf/translate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn root_reports_ready() {
        let (status, body) = get_json(&app(), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn translate_wraps_result_in_envelope() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/translate",
            json!({ "text": "Hello", "targetLang": "fr" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["translatedText"], "Bonjour");
        assert_eq!(body["data"]["sourceLanguage"], "auto");
        assert_eq!(body["data"]["detectedLanguage"], "en");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn blank_text_is_a_bad_request() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/translate/text",
            json!({ "text": "   " }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Text is required for translation");
    }

    #[tokio::test]
    async fn speech_batch_and_detection() {
        let app = app();

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/translate/speech",
            json!({ "recognizedText": "thank you", "sourceLang": "en", "targetLang": "hi" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["translatedText"], "धन्यवाद");
        assert!(body["data"].get("detectedLanguage").is_none());

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/translate/batch",
            json!({ "texts": ["hello", "thank you"], "sourceLang": "en", "targetLang": "es" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["translations"][0]["translated"], "Hola");
        assert_eq!(body["data"]["translations"][1]["original"], "thank you");

        let (status, _) = send_json(&app, Method::POST, "/api/translate/batch", json!({})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/translate/detect-language",
            json!({ "text": "the cat and the dog" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["detectedLanguage"], "en");
        assert_eq!(body["data"]["languageName"], "English");
    }

    async fn send_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> (StatusCode, Value) {
        let mut request = Request::builder().method(Method::POST).uri(uri);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let request = request.body(Body::from(body.to_string())).unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assert_validation_envelope(status: StatusCode, body: &Value) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn malformed_json_bodies_use_error_envelope() {
        let app = app();
        let json = Some("application/json");

        let (status, body) = send_raw(&app, "/api/translate", json, r#"{"text":5}"#).await;
        assert_validation_envelope(status, &body);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));

        let (status, body) = send_raw(&app, "/api/notes", json, r#"{"content":123}"#).await;
        assert_validation_envelope(status, &body);

        let (status, body) = send_raw(&app, "/api/translate/text", None, r#"{"text":"hi"}"#).await;
        assert_validation_envelope(status, &body);

        let (status, body) = send_raw(&app, "/api/text-pdf/create-pdf", json, "{").await;
        assert_validation_envelope(status, &body);
    }

    #[tokio::test]
    async fn bad_path_and_query_use_error_envelope() {
        let app = app();

        let (status, body) = get_json(&app, "/api/notes/abc").await;
        assert_validation_envelope(status, &body);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid path parameter"));

        let (status, body) = get_json(&app, "/api/notes?page=first").await;
        assert_validation_envelope(status, &body);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));
    }

    #[tokio::test]
    async fn empty_batch_returns_no_translations() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/translate/batch",
            json!({ "texts": [] }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["translations"], json!([]));
    }

    #[tokio::test]
    async fn languages_are_listed() {
        let (status, body) = get_json(&app(), "/api/translate/languages").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 18);
        assert_eq!(body["data"]["gu"], "Gujarati");
    }

    #[tokio::test]
    async fn notes_lifecycle() {
        let app = app();

        let (status, body) = send_json(
            &app,
            Method::POST,
            "/api/notes",
            json!({ "title": "Trip", "content": "Where is the hotel", "tags": ["travel"] }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["message"], "Note created successfully");
        let id = body["data"]["note"]["id"].as_i64().unwrap();

        let (status, body) = get_json(&app, &format!("/api/notes/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["note"]["content"], "Where is the hotel");

        let (status, body) = send_json(
            &app,
            Method::PUT,
            &format!("/api/notes/{id}"),
            json!({ "tags": ["travel", "paris"] }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["note"]["tags"], json!(["travel", "paris"]));

        let (_, body) = get_json(&app, "/api/notes/search?query=hotel&tags=paris,work").await;
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["tags"], "paris,work");

        let request = Request::builder()
            .method(Method::DELETE)
            .uri(format!("/api/notes/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get_json(&app, &format!("/api/notes/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Note not found");
    }

    #[tokio::test]
    async fn note_without_content_is_rejected() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/notes",
            json!({ "title": "empty" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Note content is required");
    }

    #[tokio::test]
    async fn notes_are_paginated() {
        let app = app();
        for i in 0..15 {
            send_json(
                &app,
                Method::POST,
                "/api/notes",
                json!({ "content": format!("note {i}") }),
            )
            .await;
        }

        let (status, body) = get_json(&app, "/api/notes?page=2&limit=10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["notes"].as_array().unwrap().len(), 5);
        assert_eq!(body["data"]["total"], 15);
        assert_eq!(body["data"]["page"], 2);
        assert_eq!(body["data"]["totalPages"], 2);
    }

    #[tokio::test]
    async fn uploaded_pdf_is_translated() {
        let pdf = create_pdf("Hello", &DocumentInfo::default()).unwrap();
        let (status, bytes) = send(&app(), multipart(&pdf, "application/pdf", "fr")).await;

        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["data"]["originalPages"], 1);
        assert_eq!(body["data"]["targetLanguage"], "fr");
        assert_eq!(body["data"]["translatedText"], "Bonjour");
    }

    #[tokio::test]
    async fn non_pdf_upload_is_rejected() {
        let (status, bytes) = send(&app(), multipart(b"just text", "text/plain", "fr")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Only PDF files are allowed");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let mut oversized = b"%PDF-1.5\n".to_vec();
        oversized.resize(8 * 1024, b'x');
        let (status, bytes) = send(
            &app_with_limit(1024),
            multipart(&oversized, "application/pdf", "fr"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "File too large. Maximum size is 10MB.");
    }

    #[tokio::test]
    async fn text_pdf_download_is_a_pdf_attachment() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/text-pdf/translate-download")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "text": "good morning", "sourceLang": "en", "targetLang": "es", "filename": "greeting" })
                    .to_string(),
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"greeting.pdf\""
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let extracted = crate::pdf::extract_text(&bytes).unwrap();
        assert!(extracted.text.contains("Buenos"));
        assert_eq!(extracted.metadata.title.as_deref(), Some("greeting"));
    }

    #[tokio::test]
    async fn control_characters_are_dropped_from_download_name() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/text-pdf/create-pdf")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({ "text": "hello", "filename": "a\u{0001}b" }).to_string(),
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ab.pdf\""
        );
    }

    #[tokio::test]
    async fn preview_points_at_download() {
        let (status, body) = send_json(
            &app(),
            Method::POST,
            "/api/text-pdf/translate-preview",
            json!({ "text": "thank you", "targetLang": "fr" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["translatedText"], "Merci");
        assert_eq!(body["data"]["textLength"], 9);
        assert_eq!(
            body["data"]["pdfDownloadUrl"],
            "/api/text-pdf/translate-download"
        );
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/translate/text",
            "/api/pdf/translate-download",
            "/api/text-pdf/create-pdf",
            "/api/notes/{id}",
            "/api/notes/search",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
