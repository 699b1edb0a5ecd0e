use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

pub const DEFAULT_TAG_NAME: &str = "Note";
pub const DEFAULT_TAG_COLOR: &str = "yellow";
pub const DEFAULT_CREATED_BY: &str = "unknown";

pub const LIST_REQUIRED_MESSAGE: &str = "messageId is required";
pub const CREATE_REQUIRED_MESSAGE: &str = "messageId and text are required";
pub const INVALID_ID_MESSAGE: &str = "id must be a valid UUID";
pub const BODY_TOO_LARGE_MESSAGE: &str = "request body too large";

/// Upper bound on a `POST /notes` body.
pub const NOTE_BODY_LIMIT: usize = 100 * 1024;

/// A note as persisted, including store-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub message_id: String,
    pub text: String,
    pub tag_name: String,
    pub tag_color: String,
    pub snippet_key: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /notes`. Every field is optional at the wire level so a
/// missing field is reported with the fixed client message instead of a
/// deserializer error.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    #[validate(required, length(min = 1))]
    pub message_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub text: Option<String>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
    /// Field name used by older clients; `tagColor` wins when both are sent.
    pub color: Option<String>,
    pub snippet_key: Option<String>,
    pub created_by: Option<String>,
}

/// Row values for an insert; `created_at` is left to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewNote {
    pub id: Uuid,
    pub message_id: String,
    pub text: String,
    pub tag_name: String,
    pub tag_color: String,
    pub snippet_key: Option<String>,
    pub created_by: String,
}

impl NoteForm {
    /// Applies server-side defaults and assigns a fresh id. Returns `None`
    /// when a required field is missing or empty.
    pub fn into_new_note(self) -> Option<NewNote> {
        if self.validate().is_err() {
            return None;
        }

        Some(NewNote {
            id: Uuid::new_v4(),
            message_id: self.message_id?,
            text: self.text?,
            tag_name: or_default(self.tag_name, DEFAULT_TAG_NAME),
            tag_color: or_default(
                self.tag_color
                    .filter(|c| !c.is_empty())
                    .or(self.color),
                DEFAULT_TAG_COLOR,
            ),
            snippet_key: self.snippet_key.filter(|s| !s.is_empty()),
            created_by: or_default(self.created_by, DEFAULT_CREATED_BY),
        })
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListQuery {
    pub message_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteListResponse {
    pub notes: Vec<Note>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NoteResponse {
    pub note: Note,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        OkResponse { ok: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: serde_json::Value) -> NoteForm {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let note = form(json!({"messageId": "m1", "text": "hello"}))
            .into_new_note()
            .unwrap();

        assert_eq!(note.message_id, "m1");
        assert_eq!(note.text, "hello");
        assert_eq!(note.tag_name, DEFAULT_TAG_NAME);
        assert_eq!(note.tag_color, DEFAULT_TAG_COLOR);
        assert_eq!(note.created_by, DEFAULT_CREATED_BY);
        assert_eq!(note.snippet_key, None);
        assert!(!note.id.is_nil());
    }

    #[test]
    fn test_empty_optionals_fall_back_to_defaults() {
        let note = form(json!({
            "messageId": "m1",
            "text": "hello",
            "tagName": "",
            "tagColor": "",
            "snippetKey": "",
            "createdBy": ""
        }))
        .into_new_note()
        .unwrap();

        assert_eq!(note.tag_name, DEFAULT_TAG_NAME);
        assert_eq!(note.tag_color, DEFAULT_TAG_COLOR);
        assert_eq!(note.created_by, DEFAULT_CREATED_BY);
        assert_eq!(note.snippet_key, None);
    }

    #[test]
    fn test_supplied_fields_pass_through() {
        let note = form(json!({
            "messageId": "m1",
            "text": "hello",
            "tagName": "Follow up",
            "tagColor": "#ff0000",
            "snippetKey": "thread:42/para:3",
            "createdBy": "alex"
        }))
        .into_new_note()
        .unwrap();

        assert_eq!(note.tag_name, "Follow up");
        assert_eq!(note.tag_color, "#ff0000");
        assert_eq!(note.snippet_key.as_deref(), Some("thread:42/para:3"));
        assert_eq!(note.created_by, "alex");
    }

    #[test]
    fn test_legacy_color_field() {
        let note = form(json!({"messageId": "m1", "text": "hi", "color": "green"}))
            .into_new_note()
            .unwrap();
        assert_eq!(note.tag_color, "green");
    }

    #[test]
    fn test_tag_color_preferred_over_legacy_color() {
        let note = form(json!({
            "messageId": "m1",
            "text": "hi",
            "color": "green",
            "tagColor": "#ff0000"
        }))
        .into_new_note()
        .unwrap();
        assert_eq!(note.tag_color, "#ff0000");

        let note = form(json!({"messageId": "m1", "text": "hi", "color": "green", "tagColor": ""}))
            .into_new_note()
            .unwrap();
        assert_eq!(note.tag_color, "green");
    }

    #[test]
    fn test_required_fields() {
        assert!(form(json!({"text": "hello"})).into_new_note().is_none());
        assert!(form(json!({"messageId": "m1"})).into_new_note().is_none());
        assert!(form(json!({"messageId": "", "text": "hello"}))
            .into_new_note()
            .is_none());
        assert!(form(json!({"messageId": "m1", "text": ""}))
            .into_new_note()
            .is_none());
        assert!(NoteForm::default().into_new_note().is_none());
    }

    #[test]
    fn test_fresh_ids() {
        let a = form(json!({"messageId": "m1", "text": "x"}))
            .into_new_note()
            .unwrap();
        let b = form(json!({"messageId": "m1", "text": "x"}))
            .into_new_note()
            .unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note {
            id: Uuid::new_v4(),
            message_id: "m1".into(),
            text: "hello".into(),
            tag_name: DEFAULT_TAG_NAME.into(),
            tag_color: DEFAULT_TAG_COLOR.into(),
            snippet_key: None,
            created_by: DEFAULT_CREATED_BY.into(),
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["messageId"], "m1");
        assert_eq!(value["tagColor"], DEFAULT_TAG_COLOR);
        assert!(value["snippetKey"].is_null());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("message_id").is_none());
    }
}
