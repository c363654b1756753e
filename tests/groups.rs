mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::*;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn unknown_slug_is_not_found(pool: PgPool) {
    let app = router(pool.clone());

    let (parts, _) = send(&app, get("/group/missing/")).await;
    assert_eq!(parts.status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn group_page_lists_only_member_posts(pool: PgPool) {
    let app = router(pool.clone());
    let author = create_user(&pool, "writer").await;
    let group = create_group(&pool, "Rustaceans", "rustaceans").await;

    let base = Utc::now() - Duration::hours(1);
    for (i, text) in ["older", "newer"].iter().enumerate() {
        let id = create_post_at(&pool, author, text, base + Duration::minutes(i as i64)).await;
        sqlx::query("UPDATE posts SET group_id = $1 WHERE id = $2")
            .bind(group)
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
    }
    create_post_at(&pool, author, "unaffiliated", Utc::now()).await;

    let (parts, body) = send(&app, get("/group/rustaceans/")).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(body["data"]["group"]["title"], "Rustaceans");
    let items = body["data"]["page"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "newer");
    assert_eq!(items[1]["text"], "older");
    assert_eq!(items[0]["group"]["slug"], "rustaceans");
}

#[sqlx::test(migrations = "./migrations")]
async fn slug_collisions_get_a_numeric_suffix(pool: PgPool) {
    let app = router(pool.clone());
    let user = create_user(&pool, "founder").await;
    let token = token_for(user);

    let payload = json!({ "title": "Reading Club", "description": "books" });
    let (parts, body) = send(&app, post_json("/group/", Some(&token), payload.clone())).await;
    assert_eq!(parts.status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "reading-club");

    let (parts, body) = send(&app, post_json("/group/", Some(&token), payload)).await;
    assert_eq!(parts.status, StatusCode::CREATED);
    assert_eq!(body["data"]["slug"], "reading-club-1");
}

#[sqlx::test(migrations = "./migrations")]
async fn group_creation_requires_authentication(pool: PgPool) {
    let app = router(pool.clone());

    let (parts, _) = send(
        &app,
        post_json("/group/", None, json!({ "title": "x", "description": "y" })),
    )
    .await;
    assert_eq!(parts.status, StatusCode::SEE_OTHER);
    assert_eq!(location(&parts), "/auth/sign-in");
}

#[sqlx::test(migrations = "./migrations")]
async fn posting_into_an_unknown_group_is_rejected(pool: PgPool) {
    let app = router(pool.clone());
    let author = create_user(&pool, "writer").await;
    let token = token_for(author);

    let (parts, _) = send(
        &app,
        post_json(
            "/create/",
            Some(&token),
            json!({ "text": "hello", "group": Uuid::new_v4() }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(post_count(&pool).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn posting_into_a_group_links_it(pool: PgPool) {
    let app = router(pool.clone());
    let author = create_user(&pool, "writer").await;
    let group = create_group(&pool, "Rustaceans", "rustaceans").await;
    let token = token_for(author);

    let (parts, _) = send(
        &app,
        post_json(
            "/create/",
            Some(&token),
            json!({ "text": "on topic", "group": group }),
        ),
    )
    .await;
    assert_eq!(parts.status, StatusCode::SEE_OTHER);

    let id: Uuid = sqlx::query_scalar("SELECT id FROM posts")
        .fetch_one(&pool)
        .await
        .unwrap();
    let (_, body) = send(&app, get(&format!("/posts/{}/", id))).await;
    assert_eq!(body["data"]["post"]["group"]["title"], "Rustaceans");
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_group_detaches_its_posts(pool: PgPool) {
    let author = create_user(&pool, "writer").await;
    let group = create_group(&pool, "Doomed", "doomed").await;
    let id = create_post_at(&pool, author, "survivor", Utc::now()).await;
    sqlx::query("UPDATE posts SET group_id = $1 WHERE id = $2")
        .bind(group)
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    sqlx::query("DELETE FROM groups WHERE id = $1")
        .bind(group)
        .execute(&pool)
        .await
        .unwrap();

    let group_id: Option<Uuid> = sqlx::query_scalar("SELECT group_id FROM posts WHERE id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(group_id, None);
    assert_eq!(post_count(&pool).await, 1);
}
