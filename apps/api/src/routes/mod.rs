pub mod health;


use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};

use crate::conversation::handlers as conversation;
use crate::cover_letter::handlers as cover_letter;
use crate::resume_review::handlers as resume_review;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        // Interview coaching
        .route(
            "/create-conversation",
            post(conversation::handle_create_conversation),
        )
        .route(
            "/get-conversation",
            post(conversation::handle_get_conversation),
        )
        .route(
            "/update-conversation",
            put(conversation::handle_update_conversation),
        )
        .route(
            "/delete-conversation",
            delete(conversation::handle_delete_conversation),
        )
        // Documents
        .route(
            "/cover-letter-generator",
            post(cover_letter::handle_generate_cover_letter),
        )
        .route("/resume-review", post(resume_review::handle_resume_review))
        .layer(body_limit)
        .with_state(state)
}
