use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::pagination::Page;
use crate::posts::PostResponse;

pub mod handler;
pub mod repo;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Group {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroup {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GroupPageResponse {
    pub group: Group,
    pub page: Page<PostResponse>,
}
