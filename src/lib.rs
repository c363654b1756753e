use std::sync::Arc;

use axum::{
    extract::FromRef,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;

pub mod auth;
pub mod cache;
pub mod comments;
pub mod config;
pub mod error;
pub mod follows;
pub mod groups;
pub mod pagination;
pub mod posts;
pub mod response;

use cache::TimedCache;
use config::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub settings: Settings,
    pub index_cache: Arc<TimedCache>,
}

impl AppState {
    pub fn new(pool: PgPool, settings: Settings) -> Self {
        Self {
            pool,
            settings,
            index_cache: Arc::new(TimedCache::new(posts::INDEX_CACHE_TTL)),
        }
    }
}

impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> PgPool {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings.clone()
    }
}

impl FromRef<AppState> for Arc<TimedCache> {
    fn from_ref(app_state: &AppState) -> Arc<TimedCache> {
        app_state.index_cache.clone()
    }
}

pub fn app(app_state: AppState) -> Router {
    let auth_router = Router::new()
        .route("/sign-up", post(auth::handler::signup))
        .route("/sign-in", post(auth::handler::login))
        .route("/me", get(auth::handler::me));

    Router::new()
        .route("/", get(posts::handler::index))
        .route(
            "/create/",
            get(posts::handler::post_create_form).post(posts::handler::post_create),
        )
        .route("/posts/:id/", get(posts::handler::post_detail))
        .route(
            "/posts/:id/edit/",
            get(posts::handler::post_edit_form).post(posts::handler::post_edit),
        )
        .route("/posts/:id/comment/", post(comments::handler::add_comment))
        .route("/group/", post(groups::handler::group_create))
        .route("/group/:slug/", get(groups::handler::group_detail))
        .route("/profile/:username/", get(posts::handler::profile))
        .route(
            "/profile/:username/follow/",
            post(follows::handler::follow_user),
        )
        .route(
            "/profile/:username/unfollow/",
            post(follows::handler::unfollow_user),
        )
        .route("/follow/", get(follows::handler::follow_feed))
        .nest("/auth", auth_router)
        .with_state(app_state)
}
