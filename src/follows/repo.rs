use sqlx::PgPool;
use uuid::Uuid;

use crate::follows::Follow;

pub async fn exists(pool: &PgPool, user_id: Uuid, author_id: Uuid) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM follows WHERE user_id = $1 AND author_id = $2")
        .bind(user_id)
        .bind(author_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Writes the edge unless it already exists. `None` means no new row was
/// inserted.
pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    author_id: Uuid,
) -> Result<Option<Follow>, sqlx::Error> {
    sqlx::query_as::<_, Follow>(
        r#"
        INSERT INTO follows (user_id, author_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, author_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(author_id)
    .fetch_optional(pool)
    .await
}

/// Idempotent: deleting an absent edge is a no-op.
pub async fn delete(pool: &PgPool, user_id: Uuid, author_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM follows WHERE user_id = $1 AND author_id = $2")
        .bind(user_id)
        .bind(author_id)
        .execute(pool)
        .await?;
    Ok(())
}
