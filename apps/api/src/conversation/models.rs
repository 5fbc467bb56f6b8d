use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged message within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// True when turns alternate user/assistant, start with the user, and end
/// on a completed exchange.
pub fn is_complete_transcript(turns: &[Turn]) -> bool {
    turns.len() % 2 == 0
        && turns.iter().enumerate().all(|(i, turn)| {
            let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
            turn.role == expected
        })
}

#[derive(Debug, Clone, FromRow)]
pub struct ConversationRow {
    pub id: i64,
    pub tag: String,
    pub messages: Json<Vec<Turn>>,
    /// Bumped on every update; writers compare-and-swap on it.
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public shape of a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationView {
    pub conversation_id: i64,
    pub tag: String,
    pub messages: Vec<Turn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ConversationRow> for ConversationView {
    fn from(row: ConversationRow) -> Self {
        Self {
            conversation_id: row.id,
            tag: row.tag,
            messages: row.messages.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ConversationIdRequest {
    pub conversation_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateConversationRequest {
    pub conversation_id: i64,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedConversation {
    pub conversation_id: i64,
}
