use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, UpdateNoteRequest},
    error::AppError,
    models::{NewNote, Note, NoteUpdate},
    repository::Repository,
};

const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

impl NotesPage {
    pub const fn total_pages(&self) -> usize {
        self.total.div_ceil(self.limit)
    }
}

#[derive(Clone)]
pub struct NoteService {
    repo: Arc<tokio::sync::Mutex<Repository>>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl NoteService {
    pub const fn new(repo: Arc<tokio::sync::Mutex<Repository>>) -> Self {
        Self { repo }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<Note, AppError> {
        let content = non_blank(request.content)
            .ok_or_else(|| AppError::Validation("Note content is required".to_string()))?;

        let note = self.repo.lock().await.create_note(NewNote {
            title: non_blank(request.title),
            content,
            translation_data: request.translation_data,
            tags: request.tags,
        });

        tracing::info!("Created note {}", note.id);
        Ok(note)
    }

    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<Note>, AppError> {
        if request
            .content
            .as_ref()
            .is_some_and(|content| content.trim().is_empty())
        {
            return Err(AppError::Validation(
                "Note content cannot be empty".to_string(),
            ));
        }

        let update = NoteUpdate {
            title: request.title,
            content: request.content,
            translation_data: request.translation_data,
            tags: request.tags,
        };

        Ok(self.repo.lock().await.update_note(id, update))
    }

    pub async fn delete_note(&self, id: i64) -> bool {
        self.repo.lock().await.delete_note(id)
    }

    pub async fn get_one_note(&self, id: i64) -> Option<Note> {
        self.repo.lock().await.get_one_note(id)
    }

    /// `page` is 1-based; `search` matches title, content and tags.
    pub async fn list_notes(&self, page: usize, limit: usize, search: Option<&str>) -> NotesPage {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);
        let needle = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let repo = self.repo.lock().await;
        let filtered: Vec<&Note> = repo
            .get_all_notes()
            .filter(|note| needle.as_deref().is_none_or(|n| note.matches(n)))
            .collect();

        let total = filtered.len();
        let notes = filtered
            .into_iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .cloned()
            .collect();

        NotesPage {
            notes,
            total,
            page,
            limit,
        }
    }

    /// Notes whose title or content contains `query` and, when `tags` is
    /// non-empty, that carry at least one of them.
    pub async fn search_notes(&self, query: Option<&str>, tags: &[String]) -> Vec<Note> {
        let needle = query
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        self.repo
            .lock()
            .await
            .get_all_notes()
            .filter(|note| {
                needle.as_deref().is_none_or(|n| {
                    note.title.to_lowercase().contains(n) || note.content.to_lowercase().contains(n)
                })
            })
            .filter(|note| tags.is_empty() || tags.iter().any(|tag| note.tags.contains(tag)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> NoteService {
        NoteService::new(Arc::new(tokio::sync::Mutex::new(Repository::new())))
    }

    fn note(title: &str, content: &str, tags: &[&str]) -> CreateNoteRequest {
        CreateNoteRequest {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            translation_data: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_identical_note() {
        let service = service();
        let created = service
            .create_note(CreateNoteRequest {
                title: None,
                content: Some("x".to_string()),
                translation_data: Some(serde_json::json!({ "targetLanguage": "fr" })),
                tags: Vec::new(),
            })
            .await
            .unwrap();

        assert_eq!(service.get_one_note(created.id).await, Some(created));
    }

    #[tokio::test]
    async fn create_requires_content() {
        let service = service();
        let mut request = note("t", "", &[]);
        assert!(matches!(
            service.create_note(request.clone()).await,
            Err(AppError::Validation(_))
        ));

        request.content = None;
        assert!(matches!(
            service.create_note(request).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let service = service();
        let created = service.create_note(note("t", "c", &[])).await.unwrap();

        assert!(service.delete_note(created.id).await);
        assert_eq!(service.get_one_note(created.id).await, None);
        assert!(!service.delete_note(created.id).await);
    }

    #[tokio::test]
    async fn second_page_of_fifteen() {
        let service = service();
        for i in 0..15 {
            service
                .create_note(note(&format!("note {i}"), "body", &[]))
                .await
                .unwrap();
        }

        let page = service.list_notes(2, 10, None).await;

        assert_eq!(page.notes.len(), 5);
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.notes[0].title, "note 10");
    }

    #[tokio::test]
    async fn list_filters_case_insensitively_over_tags_too() {
        let service = service();
        service
            .create_note(note("Groceries", "milk", &["home"]))
            .await
            .unwrap();
        service
            .create_note(note("Standup", "notes", &["Work"]))
            .await
            .unwrap();
        service
            .create_note(note("Trip", "pack the WORK laptop", &[]))
            .await
            .unwrap();

        let page = service.list_notes(1, 10, Some("work")).await;
        let titles: Vec<_> = page.notes.iter().map(|n| n.title.as_str()).collect();

        assert_eq!(titles, ["Standup", "Trip"]);
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn list_clamps_page_and_limit() {
        let service = service();
        service.create_note(note("a", "b", &[])).await.unwrap();

        let page = service.list_notes(0, 0, None).await;
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 1);
        assert_eq!(page.notes.len(), 1);
    }

    #[tokio::test]
    async fn search_combines_query_and_tags() {
        let service = service();
        service
            .create_note(note("Paris trip", "book hotel", &["travel"]))
            .await
            .unwrap();
        service
            .create_note(note("Paris office", "visit team", &["work"]))
            .await
            .unwrap();
        service
            .create_note(note("Rome", "hotel near forum", &["travel"]))
            .await
            .unwrap();

        let by_query = service.search_notes(Some("paris"), &[]).await;
        assert_eq!(by_query.len(), 2);

        let by_tags = service.search_notes(None, &["travel".to_string()]).await;
        assert_eq!(by_tags.len(), 2);

        let both = service
            .search_notes(Some("HOTEL"), &["travel".to_string(), "work".to_string()])
            .await;
        let titles: Vec<_> = both.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["Paris trip", "Rome"]);

        assert_eq!(service.search_notes(None, &[]).await.len(), 3);
    }

    #[tokio::test]
    async fn update_rejects_blank_content_and_missing_ids() {
        let service = service();
        let created = service.create_note(note("t", "c", &[])).await.unwrap();

        let blank = UpdateNoteRequest {
            title: None,
            content: Some("  ".to_string()),
            translation_data: None,
            tags: None,
        };
        assert!(matches!(
            service.update_note(created.id, blank).await,
            Err(AppError::Validation(_))
        ));

        let retag = UpdateNoteRequest {
            title: None,
            content: None,
            translation_data: None,
            tags: Some(vec!["new".to_string()]),
        };
        assert_eq!(service.update_note(999, retag.clone()).await.unwrap(), None);

        let updated = service
            .update_note(created.id, retag)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.tags, ["new"]);
        assert_eq!(updated.content, "c");
    }
}
