use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Translation payload attached by the client, stored as-is
    #[schema(value_type = Option<Object>)]
    pub translation_data: Option<serde_json::Value>,
    /// Note tags
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewNote {
    pub title: Option<String>,
    pub content: String,
    pub translation_data: Option<serde_json::Value>,
    pub tags: Vec<String>,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub translation_data: Option<serde_json::Value>,
    pub tags: Option<Vec<String>>,
}

impl Note {
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle_lower))
    }

    pub fn apply(&mut self, update: NoteUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(translation_data) = update.translation_data {
            self.translation_data = Some(translation_data);
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }
}

/// Document information dictionary entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PdfMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub producer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    /// ISO code or `auto`
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationRequest {
    pub fn new(
        text: impl Into<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    pub translated_text: String,
    /// Set only when the source language was `auto`
    pub detected_language: Option<String>,
    pub source_language: String,
    pub target_language: String,
    /// Provider that produced the text
    pub provider: &'static str,
}
