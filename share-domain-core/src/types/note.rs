//! Host note and share API payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ShareSession;

/// Note state as reported by the host
///
/// Only the share-related fields are modelled; everything else the host sends
/// is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteSnapshot {
    /// Host note id (numeric on the wire, kept as a string here)
    #[serde(with = "crate::utils::note_id")]
    pub id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub is_share: bool,
    /// Share token issued by the host
    #[serde(default)]
    pub share_encrypted_url: Option<String>,
    #[serde(default)]
    pub share_password: Option<String>,
}

impl NoteSnapshot {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Share state mirrored from this snapshot
    #[must_use]
    pub fn session(&self) -> ShareSession {
        ShareSession {
            is_shared: self.is_share,
            share_token: self.share_encrypted_url.clone().filter(|t| !t.is_empty()),
            share_password: self.share_password.clone().unwrap_or_default(),
        }
    }

    /// Merges a session returned by a share operation back into the snapshot.
    #[must_use]
    pub fn with_session(mut self, session: &ShareSession) -> Self {
        self.is_share = session.is_shared;
        self.share_encrypted_url.clone_from(&session.share_token);
        self.share_password = Some(session.share_password.clone());
        self
    }
}

/// `notes.list` filter
///
/// The defaults match the host's main note list (not archived, not recycled,
/// first page).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteListFilter {
    pub is_archived: bool,
    pub is_recycle: bool,
    pub is_share: Option<bool>,
    #[serde(rename = "type")]
    pub note_type: i32,
    pub tag_id: Option<i64>,
    pub without_tag: bool,
    pub with_file: bool,
    pub with_link: bool,
    pub is_use_ai_query: bool,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub has_todo: bool,
    pub search_text: String,
    pub page: u32,
    pub size: u32,
}

impl Default for NoteListFilter {
    fn default() -> Self {
        Self {
            is_archived: false,
            is_recycle: false,
            is_share: None,
            note_type: 0,
            tag_id: None,
            without_tag: false,
            with_file: false,
            with_link: false,
            is_use_ai_query: false,
            start_date: None,
            end_date: None,
            has_todo: false,
            search_text: String::new(),
            page: 1,
            size: 30,
        }
    }
}

/// `notes.shareNote` input, used for both creating and cancelling a share
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareNoteRequest {
    #[serde(with = "crate::utils::note_id")]
    pub id: String,
    pub is_cancel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expire_at: Option<DateTime<Utc>>,
}

impl ShareNoteRequest {
    /// Create (or refresh) a share. An empty password is sent as `""`.
    #[must_use]
    pub fn create(id: &str, password: &str, expire_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id: id.to_string(),
            is_cancel: false,
            password: Some(password.to_string()),
            expire_at,
        }
    }

    #[must_use]
    pub fn cancel(id: &str) -> Self {
        Self {
            id: id.to_string(),
            is_cancel: true,
            password: None,
            expire_at: None,
        }
    }
}

/// `notes.shareNote` output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareNoteResponse {
    #[serde(default)]
    pub share_encrypted_url: Option<String>,
    #[serde(default)]
    pub share_password: Option<String>,
}
