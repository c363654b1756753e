use sqlx::PgPool;
use uuid::Uuid;

use crate::posts::{Post, PostRecord};

fn post_query(filter: &str) -> String {
    format!(
        r#"
        SELECT p.id, p.text, p.pub_date, p.author_id, u.username,
               p.group_id, g.title AS group_title, g.slug AS group_slug, p.image
        FROM posts p
        JOIN users u ON p.author_id = u.id
        LEFT JOIN groups g ON p.group_id = g.id
        {}
        ORDER BY p.pub_date DESC
        "#,
        filter
    )
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(&post_query(""))
        .fetch_all(pool)
        .await
}

pub async fn list_by_group(pool: &PgPool, group_id: Uuid) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(&post_query("WHERE p.group_id = $1"))
        .bind(group_id)
        .fetch_all(pool)
        .await
}

pub async fn list_by_author(
    pool: &PgPool,
    author_id: Uuid,
) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(&post_query("WHERE p.author_id = $1"))
        .bind(author_id)
        .fetch_all(pool)
        .await
}

/// Posts authored by anyone `user_id` follows.
pub async fn list_followed(pool: &PgPool, user_id: Uuid) -> Result<Vec<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(&post_query(
        "WHERE p.author_id IN (SELECT f.author_id FROM follows f WHERE f.user_id = $1)",
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<PostRecord>, sqlx::Error> {
    sqlx::query_as::<_, PostRecord>(&post_query("WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_by_author(pool: &PgPool, author_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (text, pub_date, group_id, author_id, image)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(text)
    .bind(chrono::Utc::now())
    .bind(group_id)
    .bind(author_id)
    .bind(image)
    .fetch_one(pool)
    .await
}

/// Author and pub_date are immutable; the UPDATE touches only the editable
/// columns.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    text: &str,
    group_id: Option<Uuid>,
    image: Option<&str>,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        "UPDATE posts SET text = $1, group_id = $2, image = $3 WHERE id = $4 RETURNING *",
    )
    .bind(text)
    .bind(group_id)
    .bind(image)
    .bind(id)
    .fetch_one(pool)
    .await
}
