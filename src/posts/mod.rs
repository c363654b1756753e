use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::comments::CommentResponse;
use crate::pagination::Page;

pub mod handler;
pub mod repo;

/// Posts shown per listing page.
pub const POSTS_PER_PAGE: usize = 10;

/// How long the index listing may be served stale.
pub const INDEX_CACHE_TTL: Duration = Duration::from_secs(20);

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub group_id: Option<Uuid>,
    pub author_id: Uuid,
    pub image: Option<String>,
}

/// Post row with author and group columns joined for rendering.
#[derive(Debug, sqlx::FromRow)]
pub struct PostRecord {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: Uuid,
    pub username: String,
    pub group_id: Option<Uuid>,
    pub group_title: Option<String>,
    pub group_slug: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: PostAuthor,
    pub group: Option<PostGroup>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct PostGroup {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
}

impl From<PostRecord> for PostResponse {
    fn from(p: PostRecord) -> Self {
        PostResponse {
            id: p.id,
            text: p.text,
            pub_date: p.pub_date,
            author: PostAuthor {
                id: p.author_id,
                username: p.username,
            },
            group: match (p.group_id, p.group_title, p.group_slug) {
                (Some(id), Some(title), Some(slug)) => Some(PostGroup { id, title, slug }),
                _ => None,
            },
            image: p.image,
        }
    }
}

/// Submission payload for creating or editing a post.
#[derive(Debug, Deserialize, Validate)]
pub struct PostForm {
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
}

/// Blank or pre-filled form context returned by the GET form routes.
#[derive(Debug, Serialize)]
pub struct PostFormContext {
    pub text: String,
    pub group: Option<Uuid>,
    pub image: Option<String>,
    pub is_edit: bool,
}

#[derive(Debug, Serialize)]
pub struct ProfileAuthor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub author: ProfileAuthor,
    pub page: Page<PostResponse>,
    pub post_count: i64,
    /// Whether the requesting actor follows this profile's user. Always
    /// false for one's own profile and for unauthenticated requests.
    pub following: bool,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: PostResponse,
    pub post_count: i64,
    pub comments: Vec<CommentResponse>,
}
