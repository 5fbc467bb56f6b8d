use axum::{extract::State, Json};

use crate::conversation::models::{
    ConversationIdRequest, ConversationView, CreateConversationRequest, DeletedConversation,
    UpdateConversationRequest,
};
use crate::conversation::service;
use crate::envelope::{ok, Envelope};
use crate::errors::AppError;
use crate::extract::JsonBody;
use crate::state::AppState;

// Each handler checks a connection out of the pool up front; it returns to
// the pool when `conn` drops, on success and on every error path.

/// POST /create-conversation
pub async fn handle_create_conversation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateConversationRequest>,
) -> Result<Json<Envelope<ConversationView>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let view = service::start_conversation(&mut conn, state.llm.as_ref(), &req.prompt).await?;
    Ok(ok(view))
}

/// POST /get-conversation
pub async fn handle_get_conversation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ConversationIdRequest>,
) -> Result<Json<Envelope<ConversationView>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let view = service::get_conversation(&mut conn, req.conversation_id).await?;
    Ok(ok(view))
}

/// PUT /update-conversation
///
/// Returns only the new assistant reply.
pub async fn handle_update_conversation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateConversationRequest>,
) -> Result<Json<Envelope<String>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let reply = service::continue_conversation(
        &mut conn,
        state.llm.as_ref(),
        req.conversation_id,
        &req.prompt,
    )
    .await?;
    Ok(ok(reply))
}

/// DELETE /delete-conversation
pub async fn handle_delete_conversation(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<ConversationIdRequest>,
) -> Result<Json<Envelope<DeletedConversation>>, AppError> {
    let mut conn = state.db.acquire().await?;
    let conversation_id = service::delete_conversation(&mut conn, req.conversation_id).await?;
    Ok(ok(DeletedConversation { conversation_id }))
}
