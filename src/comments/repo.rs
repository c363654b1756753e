use sqlx::PgPool;
use uuid::Uuid;

use crate::comments::{Comment, CommentRecord};

pub async fn list_for_post(pool: &PgPool, post_id: Uuid) -> Result<Vec<CommentRecord>, sqlx::Error> {
    sqlx::query_as::<_, CommentRecord>(
        r#"
        SELECT c.id, c.post_id, c.author_id, u.username, c.text, c.created
        FROM comments c
        JOIN users u ON c.author_id = u.id
        WHERE c.post_id = $1
        ORDER BY c.created DESC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    post_id: Uuid,
    author_id: Uuid,
    text: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO comments (post_id, author_id, text, created)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(text)
    .bind(chrono::Utc::now())
    .fetch_one(pool)
    .await
}
