//! Conversation lifecycle: start, read, continue, delete.

use sqlx::SqliteConnection;
use tracing::{info, warn};

use crate::conversation::models::{is_complete_transcript, ConversationView, Turn};
use crate::conversation::prompts::{
    clean_tag, COACH_SYSTEM, REPLY_SAMPLING, TAG_SAMPLING, TAG_SYSTEM,
};
use crate::conversation::store;
use crate::errors::AppError;
use crate::llm_client::{complete_prompt, CompletionClient, CompletionRequest};

pub const NOT_FOUND_MESSAGE: &str = "Conversation not found";
pub const CONFLICT_MESSAGE: &str = "Conversation was modified concurrently, retry the request";

fn not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.to_string())
}

fn require_prompt(prompt: &str) -> Result<(), AppError> {
    if prompt.trim().is_empty() {
        return Err(AppError::Validation("prompt cannot be empty".to_string()));
    }
    Ok(())
}

/// Generates a tag and an opening reply for `prompt`, then stores both turns
/// as a new conversation.
pub async fn start_conversation(
    conn: &mut SqliteConnection,
    llm: &dyn CompletionClient,
    prompt: &str,
) -> Result<ConversationView, AppError> {
    require_prompt(prompt)?;

    let tag = clean_tag(&complete_prompt(llm, TAG_SYSTEM, prompt, TAG_SAMPLING).await?);
    let reply = complete_prompt(llm, COACH_SYSTEM, prompt, REPLY_SAMPLING).await?;

    let turns = vec![Turn::user(prompt), Turn::assistant(reply)];
    let row = store::insert_conversation(conn, &tag, &turns).await?;

    info!("Started conversation {} tagged '{}'", row.id, row.tag);
    Ok(row.into())
}

pub async fn get_conversation(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<ConversationView, AppError> {
    let row = store::find_conversation(conn, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(row.into())
}

/// Sends the full history plus `prompt` to the model, appends the exchange
/// and returns the assistant's reply.
pub async fn continue_conversation(
    conn: &mut SqliteConnection,
    llm: &dyn CompletionClient,
    id: i64,
    prompt: &str,
) -> Result<String, AppError> {
    require_prompt(prompt)?;

    let row = store::find_conversation(conn, id)
        .await?
        .ok_or_else(not_found)?;

    let mut turns = row.messages.0;
    if !is_complete_transcript(&turns) {
        return Err(AppError::Internal(anyhow::anyhow!(
            "Conversation {id} has a malformed transcript ({} turns)",
            turns.len()
        )));
    }
    turns.push(Turn::user(prompt));

    let reply = llm
        .complete(CompletionRequest {
            system: COACH_SYSTEM,
            turns: &turns,
            sampling: REPLY_SAMPLING,
        })
        .await?;
    turns.push(Turn::assistant(reply.clone()));

    if !store::replace_turns(conn, id, row.version, &turns).await? {
        // Either deleted mid-flight or another update committed first.
        return match store::find_conversation(conn, id).await? {
            None => Err(not_found()),
            Some(_) => {
                warn!("Lost update race on conversation {id} at version {}", row.version);
                Err(AppError::Conflict(CONFLICT_MESSAGE.to_string()))
            }
        };
    }

    info!("Conversation {id} now has {} turns", turns.len());
    Ok(reply)
}

pub async fn delete_conversation(conn: &mut SqliteConnection, id: i64) -> Result<i64, AppError> {
    if !store::delete_conversation(conn, id).await? {
        return Err(not_found());
    }
    Ok(id)
}
