use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::query::MAX_PAGE;

/// Status value that marks a post as published.
pub const STATUS_PUBLISHED: &str = "published";

/// Author assigned to every new post. Request bodies cannot override it.
pub const DEFAULT_AUTHOR_ID: i64 = 1;

/// Represents the 'posts' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub status: String,
    pub likes: i32,
    pub category: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set only while `status` is "published".
    pub published_at: Option<DateTime<Utc>>,
}

/// `published_at` is derived from the status at write time.
pub fn published_at_for(status: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (status == STATUS_PUBLISHED).then_some(now)
}

/// DTO for creating a new post.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub status: String,
    #[serde(default)]
    pub likes: Option<i32>,
    #[serde(default)]
    pub category: Option<String>,
}

/// DTO for updating an existing post.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub status: String,
}

/// A fully-resolved row ready for insertion.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub status: String,
    pub likes: i32,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn from_request(payload: CreatePostRequest, now: DateTime<Utc>) -> Self {
        let published_at = published_at_for(&payload.status, now);
        Self {
            user_id: DEFAULT_AUTHOR_ID,
            title: payload.title,
            content: payload.content,
            status: payload.status,
            likes: payload.likes.unwrap_or(0),
            category: payload.category,
            created_at: now,
            updated_at: now,
            published_at,
        }
    }
}

/// Column values written by an update. `created_at` is never touched.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PostChanges {
    pub fn from_request(payload: UpdatePostRequest, now: DateTime<Utc>) -> Self {
        let published_at = published_at_for(&payload.status, now);
        Self {
            title: payload.title,
            content: payload.content,
            status: payload.status,
            updated_at: now,
            published_at,
        }
    }
}

/// Query parameters for listing posts.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PostListParams {
    /// Exact status match.
    pub status: Option<String>,

    /// Case-insensitive substring of the title.
    pub keywords: Option<String>,

    /// 1-based page number (default: 1).
    #[validate(range(min = 1, max = MAX_PAGE, message = "page must be between 1 and 1000000000"))]
    pub page: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub data: Vec<Post>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// `data` is left out entirely when no row matched.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Post>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
