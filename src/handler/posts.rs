//! Blog manager: publishing, listing and deleting posts

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use super::{content_length, remove_stored, UploadForm};
use crate::database::{delete_post as delete_post_doc, get_post, insert_post, list_posts, AppState};
use crate::error::{AppError, AppResult};
use crate::live::{snapshot_stream, CollectionChanged};
use crate::model::{new_document_id, Post};
use crate::slug::slugify;

/// Publishes a blog post
///
/// # Multipart Fields
///
/// - `title` (required) - the slug is derived from it
/// - `content` (required) - plain text, paragraphs separated by newlines
/// - `youtube_url` - optional video shown with the post
/// - `cover` - optional cover image, stored under `uploads/blog/`
///
/// # Response
///
/// - **201 Created** - the new post
/// - **400 Bad Request** - title or content missing
pub async fn publish_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = UploadForm::read(
        &state.storage,
        &mut multipart,
        &[("cover", "uploads/blog")],
        content_length(&headers),
    )
    .await?;

    let title = form.text("title").map(str::to_string);
    let content = form
        .text("content")
        .and_then(|_| form.raw("content"))
        .map(str::to_string);
    let (Some(title), Some(content)) = (title, content) else {
        form.discard(&state.storage).await;
        return Err(AppError::Validation("Title and Content are required.".to_string()));
    };

    let post = Post {
        id: new_document_id(),
        slug: slugify(&title),
        title,
        content,
        youtube_url: form.text("youtube_url").map(str::to_string),
        cover_url: form.take_file("cover").map(|c| c.url),
        created_at: Utc::now(),
    };

    insert_post(&state.db, &post)?;
    state.live.publish(CollectionChanged::Posts);
    tracing::info!(id = %post.id, slug = %post.slug, "post published");

    Ok((StatusCode::CREATED, Json(post)))
}

/// Lists every post, newest first
pub async fn list_all_posts(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(list_posts(&state.db)?))
}

/// Live version of [`list_all_posts`]
pub async fn stream_posts(State(state): State<AppState>) -> impl IntoResponse {
    let db = state.db.clone();
    snapshot_stream(&state.live, CollectionChanged::Posts, move || list_posts(&db))
}

/// Deletes a post, removing its cover image first on a best-effort basis
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = get_post(&state.db, &id)?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    if let Some(cover_url) = &post.cover_url {
        remove_stored(&state.storage, cover_url).await;
    }

    delete_post_doc(&state.db, &id)?;
    state.live.publish(CollectionChanged::Posts);
    tracing::info!(id = %id, slug = %post.slug, "post deleted");

    Ok(Json(json!({
        "message": "Post deleted successfully",
        "deleted_id": id
    })))
}
