use async_trait::async_trait;
use uuid::Uuid;

use super::{NoteStore, StoreError};
use crate::db::Database;
use crate::models::note::{NewNote, Note};

pub struct PgNoteStore {
    db: Database,
}

impl PgNoteStore {
    pub fn new(db: Database) -> Self {
        PgNoteStore { db }
    }
}

/// Connection-level failures are reported as an unavailable store rather
/// than a query error.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(err.to_string())
        }
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl NoteStore for PgNoteStore {
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError> {
        let created = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, message_id, text, tag_name, tag_color, snippet_key, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, message_id, text, tag_name, tag_color, snippet_key,
                      created_by, created_at
            "#,
        )
        .bind(note.id)
        .bind(&note.message_id)
        .bind(&note.text)
        .bind(&note.tag_name)
        .bind(&note.tag_color)
        .bind(&note.snippet_key)
        .bind(&note.created_by)
        .fetch_one(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(created)
    }

    async fn list_by_message_id(&self, message_id: &str) -> Result<Vec<Note>, StoreError> {
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT id, message_id, text, tag_name, tag_color, snippet_key,
                   created_by, created_at
            FROM notes
            WHERE message_id = $1
            ORDER BY created_at ASC, seq ASC
            "#,
        )
        .bind(message_id)
        .fetch_all(self.db.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(notes)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM notes")
            .execute(self.db.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    // Runs only against a real server: TEST_DATABASE_URL=postgres://...
    async fn test_store() -> Option<PgNoteStore> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let config = Config {
            database_url: Some(url),
            ..Default::default()
        };
        let db = Database::new(&config).await.unwrap();
        db.run_migrations().await.unwrap();
        Some(PgNoteStore::new(db))
    }

    fn new_note(message_id: &str, text: &str, snippet_key: Option<&str>) -> NewNote {
        NewNote {
            id: Uuid::new_v4(),
            message_id: message_id.to_string(),
            text: text.to_string(),
            tag_name: "Note".to_string(),
            tag_color: "yellow".to_string(),
            snippet_key: snippet_key.map(str::to_string),
            created_by: "unknown".to_string(),
        }
    }

    #[test]
    fn test_pool_failures_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Database(_)
        ));
    }

    #[tokio::test]
    async fn test_round_trip() {
        let Some(store) = test_store().await else {
            return;
        };

        // Unique key so concurrent runs against one database do not collide
        let message_id = format!("pg-test-{}", Uuid::new_v4());
        let first = store
            .insert(new_note(&message_id, "first", Some("snip")))
            .await
            .unwrap();
        let second = store
            .insert(new_note(&message_id, "second", None))
            .await
            .unwrap();

        assert_eq!(first.snippet_key.as_deref(), Some("snip"));

        let listed = store.list_by_message_id(&message_id).await.unwrap();
        let ids: Vec<Uuid> = listed.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);

        assert!(store.delete_by_id(first.id).await.unwrap());
        assert!(!store.delete_by_id(first.id).await.unwrap());
        assert!(store.delete_by_id(second.id).await.unwrap());
        assert!(store.list_by_message_id(&message_id).await.unwrap().is_empty());
    }
}
