//! Row-level access to the `conversations` table.
//!
//! Every function takes the request's scoped connection; nothing here opens
//! or pools connections on its own.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqliteConnection;
use tracing::info;

use crate::conversation::models::{ConversationRow, Turn};

const COLUMNS: &str = "id, tag, messages, version, created_at, updated_at";

/// Inserts a new conversation and returns the stored row, including the
/// id the database assigned.
///
/// SQLite only ends an autocommit statement's transaction once the statement
/// has been stepped to completion. This insert and `find_conversation` use
/// `fetch_all` for that reason: a half-stepped statement keeps its
/// transaction open on the pooled connection, and other connections never
/// see the write.
pub async fn insert_conversation(
    conn: &mut SqliteConnection,
    tag: &str,
    turns: &[Turn],
) -> Result<ConversationRow, sqlx::Error> {
    let now = Utc::now();
    let mut rows: Vec<ConversationRow> = sqlx::query_as(&format!(
        "INSERT INTO conversations (tag, messages, version, created_at, updated_at) \
         VALUES ($1, $2, 0, $3, $4) RETURNING {COLUMNS}"
    ))
    .bind(tag)
    .bind(Json(turns))
    .bind(now)
    .bind(now)
    .fetch_all(&mut *conn)
    .await?;
    let row = rows.pop().ok_or(sqlx::Error::RowNotFound)?;

    info!("Inserted conversation {} ({} turns)", row.id, turns.len());
    Ok(row)
}

pub async fn find_conversation(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<ConversationRow>, sqlx::Error> {
    let mut rows: Vec<ConversationRow> =
        sqlx::query_as(&format!("SELECT {COLUMNS} FROM conversations WHERE id = $1"))
            .bind(id)
            .fetch_all(&mut *conn)
            .await?;
    // `id` is the primary key, so there is at most one row.
    Ok(rows.pop())
}

/// Replaces the turn list if the row is still at `expected_version`.
/// Returns `false` when the row was deleted or another writer got there first.
pub async fn replace_turns(
    conn: &mut SqliteConnection,
    id: i64,
    expected_version: i64,
    turns: &[Turn],
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE conversations \
         SET messages = $1, version = version + 1, updated_at = $2 \
         WHERE id = $3 AND version = $4",
    )
    .bind(Json(turns))
    .bind(Utc::now())
    .bind(id)
    .bind(expected_version)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Returns `false` when no row had that id.
pub async fn delete_conversation(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() > 0 {
        info!("Deleted conversation {id}");
    }
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, memory_pool};

    fn exchange(user: &str, assistant: &str) -> Vec<Turn> {
        vec![Turn::user(user), Turn::assistant(assistant)]
    }

    #[tokio::test]
    async fn test_insert_then_find_round_trips_turns() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let turns = exchange("How do I prepare?", "Practice daily.");
        let inserted = insert_conversation(&mut conn, "Interview Prep", &turns)
            .await
            .unwrap();
        assert_eq!(inserted.version, 0);

        let found = find_conversation(&mut conn, inserted.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.tag, "Interview Prep");
        assert_eq!(found.messages.0, turns);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        assert!(find_conversation(&mut conn, 999_999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_turns_bumps_version() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let row = insert_conversation(&mut conn, "t", &exchange("a", "b"))
            .await
            .unwrap();

        let mut turns = row.messages.0.clone();
        turns.extend(exchange("c", "d"));
        assert!(replace_turns(&mut conn, row.id, 0, &turns).await.unwrap());

        let found = find_conversation(&mut conn, row.id).await.unwrap().unwrap();
        assert_eq!(found.version, 1);
        assert_eq!(found.messages.0.len(), 4);
    }

    #[tokio::test]
    async fn test_replace_turns_with_stale_version_is_rejected() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let row = insert_conversation(&mut conn, "t", &exchange("a", "b"))
            .await
            .unwrap();

        let mut first = row.messages.0.clone();
        first.extend(exchange("first", "reply"));
        assert!(replace_turns(&mut conn, row.id, 0, &first).await.unwrap());

        let mut second = row.messages.0.clone();
        second.extend(exchange("second", "reply"));
        assert!(!replace_turns(&mut conn, row.id, 0, &second).await.unwrap());

        let found = find_conversation(&mut conn, row.id).await.unwrap().unwrap();
        assert_eq!(found.messages.0[2].content, "first");
    }

    #[tokio::test]
    async fn test_delete_removes_row_once() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let row = insert_conversation(&mut conn, "t", &exchange("a", "b"))
            .await
            .unwrap();

        assert!(delete_conversation(&mut conn, row.id).await.unwrap());
        assert!(!delete_conversation(&mut conn, row.id).await.unwrap());
        assert!(find_conversation(&mut conn, row.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let pool = memory_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let first = insert_conversation(&mut conn, "t", &exchange("a", "b"))
            .await
            .unwrap();
        delete_conversation(&mut conn, first.id).await.unwrap();
        let second = insert_conversation(&mut conn, "t", &exchange("a", "b"))
            .await
            .unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_insert_is_visible_to_other_pooled_connections() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("chat.db").display());
        let pool = create_pool(&url, 2).await.unwrap();

        let mut writer = pool.acquire().await.unwrap();
        let mut reader = pool.acquire().await.unwrap();

        // Open the reader before the write so a stale snapshot would show.
        assert!(find_conversation(&mut reader, 1).await.unwrap().is_none());

        let row = insert_conversation(&mut writer, "t", &exchange("a", "b"))
            .await
            .unwrap();
        let seen = find_conversation(&mut reader, row.id).await.unwrap();
        assert_eq!(seen.map(|r| r.tag), Some("t".to_string()));

        assert!(replace_turns(&mut reader, row.id, 0, &exchange("c", "d"))
            .await
            .unwrap());
        let updated = find_conversation(&mut writer, row.id).await.unwrap().unwrap();
        assert_eq!(updated.version, 1);
        assert_eq!(updated.messages.0[0].content, "c");
    }
}
