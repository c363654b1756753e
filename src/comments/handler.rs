use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::jwt,
    comments::{repo, CommentForm},
    error::AppError,
    posts,
};

pub async fn add_comment(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Path(id): Path<Uuid>,
    Json(payload): Json<CommentForm>,
) -> Result<Redirect, AppError> {
    let post = posts::repo::get(&pool, id)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    // Invalid text is dropped without surfacing an error; the client lands
    // back on the post either way.
    if payload.validate().is_ok() {
        repo::create(&pool, post.id, claims.sub, &payload.text)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create comment: {:?}", e);
                AppError::InternalServerError
            })?;
    }

    Ok(Redirect::to(&format!("/posts/{}/", id)))
}
