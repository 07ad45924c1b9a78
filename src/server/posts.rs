use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::error::Error;
use crate::posts::{NewPost, PostPatch};
use crate::server::AppState;
use crate::server::dto::PostSlug;
use crate::server::response::{ApiError, ApiResponse};

/// GET /api/admin/posts - all post headers, newest first.
pub async fn list_posts(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let posts = state
        .posts
        .list_metadata()
        .map_err(|_| ApiError::internal("Failed to list posts"))?;

    Ok::<_, ApiError>(Json(ApiResponse::success(posts)))
}

/// GET /api/admin/posts/{slug} - one full post for the editing view.
pub async fn get_post(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let post = state
        .posts
        .get(&slug)
        .map_err(|_| ApiError::internal("Failed to read post"))?
        .ok_or_else(|| ApiError::not_found(format!("Post with slug '{slug}' not found")))?;

    Ok::<_, ApiError>(Json(ApiResponse::success(post)))
}

/// POST /api/admin/posts - create a post; the slug comes back in the payload.
pub async fn create_post(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewPost>,
) -> impl IntoResponse {
    let slug = state.posts.create(req).map_err(|e| match e {
        Error::Validation(msg) => ApiError::bad_request(msg),
        Error::AlreadyExists => ApiError::conflict("A post with this slug already exists"),
        _ => ApiError::internal("Failed to create post"),
    })?;

    trigger_rebuild(&state).await;

    Ok::<_, ApiError>((
        StatusCode::CREATED,
        Json(ApiResponse::success(PostSlug { slug })),
    ))
}

/// PUT /api/admin/posts/{slug} - partial update; the slug never changes.
pub async fn update_post(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(patch): Json<PostPatch>,
) -> impl IntoResponse {
    if patch.is_empty() {
        return Err(ApiError::bad_request("No fields provided for update"));
    }

    state.posts.update(&slug, patch).map_err(|e| match e {
        Error::NotFound => ApiError::not_found(format!("Post with slug '{slug}' not found")),
        _ => ApiError::internal("Failed to update post"),
    })?;

    trigger_rebuild(&state).await;

    Ok::<_, ApiError>(Json(ApiResponse::success(PostSlug { slug })))
}

/// DELETE /api/admin/posts/{slug} - remove a post. Irreversible.
pub async fn delete_post(
    _admin: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    state.posts.delete(&slug).map_err(|e| match e {
        Error::NotFound => ApiError::not_found(format!("Post with slug '{slug}' not found")),
        _ => ApiError::internal("Failed to delete post"),
    })?;

    trigger_rebuild(&state).await;

    Ok::<_, ApiError>(Json(ApiResponse::success(PostSlug { slug })))
}

/// Kicks off a site rebuild after a successful mutation.
///
/// Production only; the dev server watches the content directory itself.
/// The write has already landed, so a rebuild failure is logged and the
/// request still succeeds.
async fn trigger_rebuild(state: &AppState) {
    if !state.config.environment.is_production() {
        tracing::debug!("development mode: skipping site rebuild");
        return;
    }

    if let Err(e) = state.builder.rebuild().await {
        tracing::warn!("site rebuild failed: {e}");
    }
}
