use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::note::{
    Note, NoteForm, CREATE_REQUIRED_MESSAGE, INVALID_ID_MESSAGE, LIST_REQUIRED_MESSAGE,
};
use crate::store::NoteStore;

/// Request-level rules for notes. Input is checked before the store is
/// touched; each accepted call is exactly one store operation.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        NoteService { store }
    }

    pub async fn get_notes_by_message_id(&self, message_id: Option<&str>) -> AppResult<Vec<Note>> {
        let message_id = match message_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(AppError::BadRequest(LIST_REQUIRED_MESSAGE.to_string())),
        };

        Ok(self.store.list_by_message_id(message_id).await?)
    }

    pub async fn insert_new_note(&self, form_data: NoteForm) -> AppResult<Note> {
        let new_note = form_data
            .into_new_note()
            .ok_or_else(|| AppError::BadRequest(CREATE_REQUIRED_MESSAGE.to_string()))?;

        let note = self.store.insert(new_note).await?;
        tracing::debug!("Created note {} for message {}", note.id, note.message_id);

        Ok(note)
    }

    /// Succeeds whether or not a row with `id` existed.
    pub async fn delete_note_by_id(&self, id: &str) -> AppResult<()> {
        let id = Uuid::parse_str(id)
            .map_err(|_| AppError::BadRequest(INVALID_ID_MESSAGE.to_string()))?;

        if !self.store.delete_by_id(id).await? {
            tracing::debug!("Delete of unknown note {}", id);
        }

        Ok(())
    }

    pub async fn delete_all_notes(&self) -> AppResult<u64> {
        let removed = self.store.delete_all().await?;
        tracing::warn!("Bulk delete removed {} notes", removed);
        Ok(removed)
    }
}
