use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{NoteStore, StoreError};
use crate::models::note::{NewNote, Note};

/// Process-local note store. Rows live in insertion order, which doubles as
/// the tie-breaker for equal timestamps.
#[derive(Default)]
pub struct MemoryNoteStore {
    notes: RwLock<Vec<Note>>,
    calls: AtomicUsize,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
impl MemoryNoteStore {
    /// Number of store operations performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        self.record_call();

        let mut notes = self.notes.write().await;

        // Keep created_at non-decreasing even if the wall clock steps back
        let now = Utc::now();
        let created_at = match notes.last() {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };

        let note = Note {
            id: note.id,
            message_id: note.message_id,
            text: note.text,
            tag_name: note.tag_name,
            tag_color: note.tag_color,
            snippet_key: note.snippet_key,
            created_by: note.created_by,
            created_at,
        };
        notes.push(note.clone());

        Ok(note)
    }

    async fn list_by_message_id(&self, message_id: &str) -> Result<Vec<Note>, StoreError> {
        self.record_call();

        let mut matching: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|n| n.message_id == message_id)
            .cloned()
            .collect();

        // Stable sort keeps insertion order for equal timestamps
        matching.sort_by_key(|n| n.created_at);
        Ok(matching)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.record_call();

        let mut notes = self.notes.write().await;
        match notes.iter().position(|n| n.id == id) {
            Some(idx) => {
                notes.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.record_call();

        let mut notes = self.notes.write().await;
        let removed = notes.len() as u64;
        notes.clear();
        Ok(removed)
    }
}
