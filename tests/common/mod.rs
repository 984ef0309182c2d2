// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use posts_api::{
    config::Config,
    models::post::{NewPost, Post, PostChanges},
    query::{PAGE_SIZE, Page, PostFilter},
    routes,
    state::AppState,
    store::{DynPostStore, PostStore},
};

/// In-memory `PostStore` with the same filter semantics as the SQL builder.
#[derive(Default)]
pub struct MemoryStore {
    posts: Mutex<Vec<Post>>,
}

impl MemoryStore {
    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        let posts = self.posts.lock().unwrap();
        posts
            .iter()
            .filter(|post| filter.status.as_ref().is_none_or(|s| &post.status == s))
            .filter(|post| {
                filter.keywords.as_ref().is_none_or(|k| {
                    post.title.to_lowercase().contains(&k.to_lowercase())
                })
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list(&self, filter: &PostFilter, page: Page) -> Result<Vec<Post>, sqlx::Error> {
        Ok(self
            .matching(filter)
            .into_iter()
            .skip(page.offset() as usize)
            .take(PAGE_SIZE as usize)
            .collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<i64, sqlx::Error> {
        Ok(self.matching(filter).len() as i64)
    }

    async fn find(&self, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().find(|p| p.post_id == post_id).cloned())
    }

    async fn insert(&self, post: NewPost) -> Result<(), sqlx::Error> {
        let mut posts = self.posts.lock().unwrap();
        let post_id = posts.iter().map(|p| p.post_id).max().unwrap_or(0) + 1;
        posts.push(Post {
            post_id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            status: post.status,
            likes: post.likes,
            category: post.category,
            created_at: post.created_at,
            updated_at: post.updated_at,
            published_at: post.published_at,
        });
        Ok(())
    }

    async fn update(&self, post_id: i64, changes: PostChanges) -> Result<u64, sqlx::Error> {
        let mut posts = self.posts.lock().unwrap();
        match posts.iter_mut().find(|p| p.post_id == post_id) {
            Some(post) => {
                post.title = changes.title;
                post.content = changes.content;
                post.status = changes.status;
                post.updated_at = changes.updated_at;
                post.published_at = changes.published_at;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, post_id: i64) -> Result<u64, sqlx::Error> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.post_id != post_id);
        Ok((before - posts.len()) as u64)
    }
}

/// Every call fails as if the pool were unavailable.
pub struct FailingStore;

#[async_trait]
impl PostStore for FailingStore {
    async fn list(&self, _: &PostFilter, _: Page) -> Result<Vec<Post>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn count(&self, _: &PostFilter) -> Result<i64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn find(&self, _: i64) -> Result<Option<Post>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn insert(&self, _: NewPost) -> Result<(), sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn update(&self, _: i64, _: PostChanges) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete(&self, _: i64) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

/// Spawns the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
pub async fn spawn_app_with(store: DynPostStore) -> String {
    let config = Config {
        database_url: String::new(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        max_connections: 1,
        log_dir: "logs".to_string(),
        cors_origins: vec!["http://localhost:3000".to_string()],
    };

    let state = AppState { store, config };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

pub async fn spawn_app() -> String {
    spawn_app_with(Arc::new(MemoryStore::default())).await
}

pub async fn create_post(client: &reqwest::Client, address: &str, body: serde_json::Value) {
    let response = client
        .post(format!("{}/posts", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 201);
}
