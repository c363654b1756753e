#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, response::Parts, Request},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use quillpost_backend::{app, auth::jwt, config::settings::Settings, AppState};

pub const JWT_SECRET: &str = "test-secret";

pub fn router(pool: PgPool) -> Router {
    let settings = Settings {
        port: 0,
        addr: std::net::SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: String::new(),
        jwt_secret: JWT_SECRET.to_string(),
    };
    app(AppState::new(pool, settings))
}

pub fn token_for(user_id: Uuid) -> String {
    jwt::create_token(user_id, JWT_SECRET).unwrap()
}

pub async fn send(router: &Router, req: Request<Body>) -> (Parts, Value) {
    let res = router.clone().oneshot(req).await.unwrap();
    let (parts, body) = res.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (parts, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_auth(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn location(parts: &Parts) -> &str {
    parts.headers[header::LOCATION].to_str().unwrap()
}

pub async fn create_user(pool: &PgPool, username: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (username, email, password_hash) VALUES ($1, $2, 'not-a-hash') RETURNING id",
    )
    .bind(username)
    .bind(format!("{}@example.com", username))
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_post_at(
    pool: &PgPool,
    author_id: Uuid,
    text: &str,
    pub_date: DateTime<Utc>,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO posts (text, pub_date, author_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(text)
    .bind(pub_date)
    .bind(author_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_group(pool: &PgPool, title: &str, slug: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO groups (title, slug, description) VALUES ($1, $2, 'about') RETURNING id",
    )
    .bind(title)
    .bind(slug)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn post_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn comment_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn follow_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM follows")
        .fetch_one(pool)
        .await
        .unwrap()
}
