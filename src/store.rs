// src/store.rs

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    models::post::{NewPost, Post, PostChanges},
    query::{self, Page, PostFilter},
};

/// Persistence for the `posts` table.
///
/// Handlers only see this trait; the pool-backed implementation is injected
/// through `AppState` at startup.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// One page of rows matching `filter`, ordered by id.
    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>, sqlx::Error>;

    /// Total rows matching `filter`.
    async fn count(&self, filter: &PostFilter) -> Result<i64, sqlx::Error>;

    async fn find(&self, post_id: i64) -> Result<Option<Post>, sqlx::Error>;

    async fn insert(&self, post: NewPost) -> Result<(), sqlx::Error>;

    /// Returns the number of rows updated.
    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<u64, sqlx::Error>;

    /// Returns the number of rows deleted.
    async fn delete(&self, post_id: i64) -> Result<u64, sqlx::Error>;
}

pub type DynPostStore = Arc<dyn PostStore>;

/// `PostStore` over a Postgres connection pool.
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>, sqlx::Error> {
        let mut builder = query::select_page(filter, page);
        builder.build_query_as::<Post>().fetch_all(&self.pool).await
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64, sqlx::Error> {
        let mut builder = query::count(filter);
        builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
    }

    async fn find(&self, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM posts WHERE post_id = $1",
            query::POST_COLUMNS
        );
        sqlx::query_as::<_, Post>(&sql)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert(&self, post: NewPost) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO posts
                (user_id, title, content, status, likes, category, created_at, updated_at, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.user_id)
        .bind(post.title)
        .bind(post.content)
        .bind(post.status)
        .bind(post.likes)
        .bind(post.category)
        .bind(post.created_at)
        .bind(post.updated_at)
        .bind(post.published_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = $1,
                content = $2,
                status = $3,
                updated_at = $4,
                published_at = $5
            WHERE post_id = $6
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.status)
        .bind(changes.updated_at)
        .bind(changes.published_at)
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, post_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
