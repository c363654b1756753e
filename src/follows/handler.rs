use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use sqlx::PgPool;

use crate::{
    auth::{self, jwt},
    error::AppError,
    follows::repo,
    pagination::{paginate, PageQuery},
    posts::{self, PostResponse, POSTS_PER_PAGE},
    response::ApiResponse,
};

pub async fn follow_user(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Path(username): Path<String>,
) -> Result<Redirect, AppError> {
    let author = auth::repo::find_by_username(&pool, &username)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    // Following yourself is a silent no-op, as is a duplicate edge.
    if claims.sub != author.id {
        repo::create(&pool, claims.sub, author.id)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create follow: {:?}", e);
                AppError::InternalServerError
            })?;
    }

    Ok(Redirect::to(&format!("/profile/{}/", username)))
}

pub async fn unfollow_user(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Path(username): Path<String>,
) -> Result<Redirect, AppError> {
    let author = auth::repo::find_by_username(&pool, &username)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    repo::delete(&pool, claims.sub, author.id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete follow: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(Redirect::to(&format!("/profile/{}/", username)))
}

pub async fn follow_feed(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let posts = posts::repo::list_followed(&pool, claims.sub)
        .await
        .map_err(|e| {
            tracing::error!("Feed error: {:?}", e);
            AppError::InternalServerError
        })?;

    let page = paginate(
        posts.into_iter().map(PostResponse::from).collect(),
        POSTS_PER_PAGE,
        page.number(),
    );

    Ok(ApiResponse::success(page))
}
