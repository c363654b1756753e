use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::{self, jwt},
    cache::TimedCache,
    comments,
    error::AppError,
    follows,
    pagination::{paginate, PageQuery},
    posts::{
        repo, PostDetailResponse, PostForm, PostFormContext, PostResponse, ProfileAuthor,
        ProfileResponse, POSTS_PER_PAGE,
    },
    response::ApiResponse,
};

fn post_detail_route(id: Uuid) -> String {
    format!("/posts/{}/", id)
}

fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// The serialized body is cached under a single fixed slot, ignoring the
/// query string, so every reader shares one listing for the TTL window.
pub async fn index(
    State(pool): State<PgPool>,
    State(cache): State<Arc<TimedCache>>,
    Query(page): Query<PageQuery>,
) -> Result<Response, AppError> {
    if let Some(body) = cache.get() {
        return Ok(json_body(body));
    }

    let posts = repo::list_all(&pool).await.map_err(|e| {
        tracing::error!("Failed to list posts: {:?}", e);
        AppError::InternalServerError
    })?;

    let page = paginate(
        posts.into_iter().map(PostResponse::from).collect(),
        POSTS_PER_PAGE,
        page.number(),
    );

    let body = serde_json::to_string(&ApiResponse::success(page))
        .map_err(|_| AppError::InternalServerError)?;
    cache.put(body.clone());

    Ok(json_body(body))
}

pub async fn profile(
    State(pool): State<PgPool>,
    claims: Option<jwt::Claims>,
    Path(username): Path<String>,
    Query(page): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let user = auth::repo::find_by_username(&pool, &username)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let posts = repo::list_by_author(&pool, user.id)
        .await
        .map_err(|_| AppError::InternalServerError)?;
    let post_count = posts.len() as i64;

    let following = match &claims {
        Some(claims) if claims.sub != user.id => {
            follows::repo::exists(&pool, claims.sub, user.id)
                .await
                .map_err(|_| AppError::InternalServerError)?
        }
        _ => false,
    };

    let page = paginate(
        posts.into_iter().map(PostResponse::from).collect(),
        POSTS_PER_PAGE,
        page.number(),
    );

    Ok(ApiResponse::success(ProfileResponse {
        author: ProfileAuthor {
            id: user.id,
            username: user.username,
        },
        page,
        post_count,
        following,
    }))
}

pub async fn post_detail(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let post = repo::get(&pool, id)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    let post_count = repo::count_by_author(&pool, post.author_id)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    let comments = comments::repo::list_for_post(&pool, id)
        .await
        .map_err(|_| AppError::InternalServerError)?;

    Ok(ApiResponse::success(PostDetailResponse {
        post: PostResponse::from(post),
        post_count,
        comments: comments
            .into_iter()
            .map(comments::CommentResponse::from)
            .collect(),
    }))
}

pub async fn post_create_form(_claims: jwt::Claims) -> impl IntoResponse {
    ApiResponse::success(PostFormContext {
        text: String::new(),
        group: None,
        image: None,
        is_edit: false,
    })
}

pub async fn post_create(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Json(payload): Json<PostForm>,
) -> Result<Redirect, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    let user = auth::repo::find_by_id(&pool, claims.sub)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::Unauthorized)?;

    if let Some(group_id) = payload.group {
        ensure_group_exists(&pool, group_id).await?;
    }

    repo::create(
        &pool,
        user.id,
        &payload.text,
        payload.group,
        payload.image.as_deref(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Failed to create post: {:?}", e);
        AppError::InternalServerError
    })?;

    Ok(Redirect::to(&format!("/profile/{}/", user.username)))
}

pub async fn post_edit_form(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let post = repo::get(&pool, id)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    if post.author_id != claims.sub {
        return Ok(Redirect::to(&post_detail_route(id)).into_response());
    }

    Ok(ApiResponse::success(PostFormContext {
        text: post.text,
        group: post.group_id,
        image: post.image,
        is_edit: true,
    })
    .into_response())
}

pub async fn post_edit(
    State(pool): State<PgPool>,
    claims: jwt::Claims,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostForm>,
) -> Result<Response, AppError> {
    let post = repo::get(&pool, id)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::NotFound("Post not found".to_string()))?;

    // Another author's post: send the actor back without mutating anything.
    if post.author_id != claims.sub {
        return Ok(Redirect::to(&post_detail_route(id)).into_response());
    }

    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    if let Some(group_id) = payload.group {
        ensure_group_exists(&pool, group_id).await?;
    }

    repo::update(&pool, id, &payload.text, payload.group, payload.image.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("Failed to update post: {:?}", e);
            AppError::InternalServerError
        })?;

    Ok(Redirect::to(&post_detail_route(id)).into_response())
}

async fn ensure_group_exists(pool: &PgPool, group_id: Uuid) -> Result<(), AppError> {
    sqlx::query("SELECT id FROM groups WHERE id = $1")
        .bind(group_id)
        .fetch_optional(pool)
        .await
        .map_err(|_| AppError::InternalServerError)?
        .ok_or(AppError::UnprocessableEntity("Unknown group".to_string()))?;
    Ok(())
}
