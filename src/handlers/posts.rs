// src/handlers/posts.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    error::AppError,
    models::post::{
        CreatePostRequest, MessageResponse, NewPost, PostChanges, PostListParams,
        PostListResponse, PostResponse, UpdatePostRequest,
    },
    query::{Page, PostFilter, total_pages},
    store::DynPostStore,
};

/// List posts, five per page.
/// Optional filters: exact `status`, case-insensitive `keywords` in the title.
pub async fn list_posts(
    State(store): State<DynPostStore>,
    Query(params): Query<PostListParams>,
) -> Result<impl IntoResponse, AppError> {
    params.validate()?;

    let filter = PostFilter::from_params(&params);
    let page = params.page.map(Page::new).unwrap_or_default();

    let posts = store.list(&filter, page).await.map_err(|e| {
        tracing::error!("Failed to fetch posts: {:?}", e);
        AppError::from(e)
    })?;

    let total = store.count(&filter).await.map_err(|e| {
        tracing::error!("Failed to count posts: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(PostListResponse {
        data: posts,
        total_pages: total_pages(total),
        current_page: page.number(),
    }))
}

/// Get a single post by ID.
/// A missing row yields `{}` rather than 404.
pub async fn get_post(
    State(store): State<DynPostStore>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let post = store.find(post_id).await.map_err(|e| {
        tracing::error!("Failed to fetch post {}: {:?}", post_id, e);
        AppError::from(e)
    })?;

    Ok(Json(PostResponse { data: post }))
}

/// Create a new post. The author is always the default user.
pub async fn create_post(
    State(store): State<DynPostStore>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let post = NewPost::from_request(payload, Utc::now());

    store.insert(post).await.map_err(|e| {
        tracing::error!("Failed to create post: {:?}", e);
        AppError::from(e)
    })?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Post has been created.")),
    ))
}

pub async fn update_post(
    State(store): State<DynPostStore>,
    Path(post_id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let changes = PostChanges::from_request(payload, Utc::now());

    let updated = store.update(post_id, changes).await.map_err(|e| {
        tracing::error!("Failed to update post {}: {:?}", post_id, e);
        AppError::from(e)
    })?;

    if updated == 0 {
        tracing::debug!("Update matched no rows for post {}", post_id);
    }

    Ok(Json(MessageResponse::new(format!(
        "Post {} has been updated.",
        post_id
    ))))
}

/// Delete a post. Unknown ids are not an error.
pub async fn delete_post(
    State(store): State<DynPostStore>,
    Path(post_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = store.delete(post_id).await.map_err(|e| {
        tracing::error!("Failed to delete post {}: {:?}", post_id, e);
        AppError::from(e)
    })?;

    if deleted == 0 {
        tracing::debug!("Delete matched no rows for post {}", post_id);
    }

    Ok(Json(MessageResponse::new(format!(
        "Post {} has been deleted",
        post_id
    ))))
}
