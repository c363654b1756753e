use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use slug::slugify;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    auth::jwt,
    error::AppError,
    groups::{repo, CreateGroup, GroupPageResponse},
    pagination::{paginate, PageQuery},
    posts::{self, PostResponse, POSTS_PER_PAGE},
    response::ApiResponse,
};

pub async fn group_detail(
    State(pool): State<PgPool>,
    Path(slug): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let group = repo::find_by_slug(&pool, &slug)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("Group not found".to_string()))?;

    let posts = posts::repo::list_by_group(&pool, group.id)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let page = paginate(
        posts.into_iter().map(PostResponse::from).collect(),
        POSTS_PER_PAGE,
        page.number(),
    );

    Ok(ApiResponse::success(GroupPageResponse { group, page }))
}

pub async fn group_create(
    State(pool): State<PgPool>,
    _claims: jwt::Claims,
    Json(payload): Json<CreateGroup>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let slug_base = slugify(&payload.title);
    let mut slug = slug_base.clone();
    let mut suffix = 1;

    // Simple slug uniqueness check
    while repo::find_by_slug(&pool, &slug)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .is_some()
    {
        slug = format!("{}-{}", slug_base, suffix);
        suffix += 1;
    }

    let group = repo::create(&pool, &payload.title, &slug, &payload.description)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create group: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(ApiResponse::success(group).created())
}
