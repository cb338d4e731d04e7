use axum::{Json, extract::State, http::StatusCode};
use axum_macros::debug_handler;

use std::sync::Arc;

use crate::{
    dto::{
        ApiResponse, CreateNoteRequest, ErrorResponse, ListNotesQuery, MessageResponse,
        NoteResponse, NotesPageResponse, NotesSearchResponse, SearchNotesQuery, UpdateNoteRequest,
    },
    error::AppError,
    handlers::rest::{
        AppState,
        extract::{AppJson, AppPath, AppQuery},
    },
};

const DEFAULT_PAGE_SIZE: usize = 10;

fn not_found() -> AppError {
    AppError::NotFound("Note not found".to_string())
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 201, description = "Note created successfully", body = NoteResponse),
        (status = 400, description = "Note content is missing", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreateNoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<NoteResponse>>), AppError> {
    let note = state.notes.create_note(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(NoteResponse {
            message: Some("Note created successfully".to_string()),
            note,
        })),
    ))
}

#[utoipa::path(
    get,
    path = "/api/notes",
    params(ListNotesQuery),
    responses(
        (status = 200, description = "One page of notes", body = NotesPageResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_all_notes(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<ListNotesQuery>,
) -> Json<ApiResponse<NotesPageResponse>> {
    let page = state
        .notes
        .list_notes(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            params.search.as_deref(),
        )
        .await;

    let total_pages = page.total_pages();
    Json(ApiResponse::new(NotesPageResponse {
        notes: page.notes,
        total: page.total,
        page: page.page,
        total_pages,
    }))
}

#[utoipa::path(
    get,
    path = "/api/notes/search",
    params(SearchNotesQuery),
    responses(
        (status = 200, description = "Notes matching the query and tags", body = NotesSearchResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn search_notes(
    State(state): State<Arc<AppState>>,
    AppQuery(params): AppQuery<SearchNotesQuery>,
) -> Json<ApiResponse<NotesSearchResponse>> {
    let tags: Vec<String> = params
        .tags
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect();

    let notes = state
        .notes
        .search_notes(params.query.as_deref(), &tags)
        .await;

    Json(ApiResponse::new(NotesSearchResponse {
        total: notes.len(),
        notes,
        query: params.query.unwrap_or_default(),
        tags: params.tags.unwrap_or_default(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = NoteResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_one_note(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<NoteResponse>>, AppError> {
    let note = state.notes.get_one_note(id).await.ok_or_else(not_found)?;

    Ok(Json(ApiResponse::new(NoteResponse { message: None, note })))
}

#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = NoteResponse),
        (status = 400, description = "Empty content", body = ErrorResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateNoteRequest>,
) -> Result<Json<ApiResponse<NoteResponse>>, AppError> {
    let note = state
        .notes
        .update_note(id, payload)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ApiResponse::new(NoteResponse {
        message: Some("Note updated successfully".to_string()),
        note,
    })))
}

#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    params(
        ("id" = i64, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = MessageResponse),
        (status = 404, description = "Note not found", body = ErrorResponse)
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<MessageResponse>>, AppError> {
    if !state.notes.delete_note(id).await {
        return Err(not_found());
    }

    Ok(Json(ApiResponse::new(MessageResponse {
        message: "Note deleted successfully".to_string(),
    })))
}
