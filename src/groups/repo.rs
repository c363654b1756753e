use sqlx::PgPool;

use crate::groups::Group;

pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Group>, sqlx::Error> {
    sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE slug = $1")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    slug: &str,
    description: &str,
) -> Result<Group, sqlx::Error> {
    sqlx::query_as::<_, Group>(
        "INSERT INTO groups (title, slug, description) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(title)
    .bind(slug)
    .bind(description)
    .fetch_one(pool)
    .await
}
