use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub mod handler;
pub mod repo;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created: DateTime<Utc>,
}

/// Comment row with the author's username joined.
#[derive(Debug, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub username: String,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author: CommentAuthor,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CommentAuthor {
    pub id: Uuid,
    pub username: String,
}

impl From<CommentRecord> for CommentResponse {
    fn from(c: CommentRecord) -> Self {
        CommentResponse {
            id: c.id,
            post_id: c.post_id,
            author: CommentAuthor {
                id: c.author_id,
                username: c.username,
            },
            text: c.text,
            created: c.created,
        }
    }
}

/// Submission payload for commenting on a post.
#[derive(Debug, Deserialize, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Text cannot be empty"))]
    pub text: String,
}
