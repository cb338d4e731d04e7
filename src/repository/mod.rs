use std::collections::BTreeMap;

use chrono::Utc;

use crate::models::{NewNote, Note, NoteUpdate};

/// Process-lifetime note storage. Ids come from a counter that is never
/// reused, so iteration order of the map is creation order.
#[derive(Debug, Default)]
pub struct Repository {
    notes: BTreeMap<i64, Note>,
    last_id: i64,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_note(&mut self, new_note: NewNote) -> Note {
        self.last_id += 1;
        let now = Utc::now();

        let note = Note {
            id: self.last_id,
            title: new_note
                .title
                .unwrap_or_else(|| format!("Note {}", now.timestamp_millis())),
            content: new_note.content,
            translation_data: new_note.translation_data,
            tags: new_note.tags,
            created_at: now,
            updated_at: now,
        };

        self.notes.insert(note.id, note.clone());
        note
    }

    pub fn update_note(&mut self, id: i64, update: NoteUpdate) -> Option<Note> {
        let note = self.notes.get_mut(&id)?;
        note.apply(update, Utc::now());
        Some(note.clone())
    }

    pub fn delete_note(&mut self, id: i64) -> bool {
        self.notes.remove(&id).is_some()
    }

    pub fn get_one_note(&self, id: i64) -> Option<Note> {
        self.notes.get(&id).cloned()
    }

    pub fn get_all_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }
}
