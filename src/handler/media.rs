//! Admin dashboard: video and audio uploads, the content list and deletes

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use redb::Database;
use serde_json::json;

use super::{content_length, remove_stored, UploadForm};
use crate::database::{delete_media as delete_media_doc, get_media, insert_media, list_media, AppState};
use crate::error::{AppError, AppResult};
use crate::live::{snapshot_stream, CollectionChanged};
use crate::model::{new_document_id, parse_tags, MediaKind, MediaRecord};
use crate::portfolio::merge_newest_first;

const MISSING_FIELDS: &str = "Please select a file and enter a title.";

/// Both media collections merged, newest first
pub fn content_snapshot(db: &Database) -> AppResult<Vec<MediaRecord>> {
    let videos = list_media(db, MediaKind::Video)?;
    let audios = list_media(db, MediaKind::Audio)?;
    Ok(merge_newest_first(videos, audios))
}

/// Uploads a video or audio track
///
/// # Path Parameters
///
/// - `kind` - `video` or `audio`
///
/// # Multipart Fields
///
/// - `file` (required) - the media file, stored under `uploads/{kind}/`
/// - `title` (required)
/// - `tags` - comma separated tags (genre for audio)
/// - `cover` - optional cover art, stored under `uploads/covers/`
///
/// # Response
///
/// - **201 Created** - the new record
/// - **400 Bad Request** - missing title or file; anything already stored is removed
pub async fn upload_media(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let kind: MediaKind = kind.parse()?;
    let media_prefix = format!("uploads/{}", kind.as_str());
    let prefixes = [("file", media_prefix.as_str()), ("cover", "uploads/covers")];

    let mut form = UploadForm::read(
        &state.storage,
        &mut multipart,
        &prefixes,
        content_length(&headers),
    )
    .await?;

    let title = form.text("title").map(str::to_string);
    let Some(title) = title.filter(|_| form.has_file("file")) else {
        form.discard(&state.storage).await;
        return Err(AppError::Validation(MISSING_FIELDS.to_string()));
    };

    let tags = parse_tags(form.raw("tags").unwrap_or_default());
    let file = form.take_file("file").ok_or_else(|| AppError::Validation(MISSING_FIELDS.to_string()))?;
    let cover = form.take_file("cover");

    let record = MediaRecord {
        id: new_document_id(),
        title,
        tags,
        url: file.url,
        cover_url: cover.map(|c| c.url),
        kind,
        created_at: Utc::now(),
    };

    insert_media(&state.db, &record)?;
    state.live.publish(CollectionChanged::Media);
    tracing::info!(id = %record.id, kind = kind.as_str(), title = %record.title, "media uploaded");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists every video and audio track, newest first
pub async fn list_content(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(content_snapshot(&state.db)?))
}

/// Live version of [`list_content`]: an SSE stream of full snapshots
pub async fn stream_content(State(state): State<AppState>) -> impl IntoResponse {
    let db = state.db.clone();
    snapshot_stream(&state.live, CollectionChanged::Media, move || content_snapshot(&db))
}

/// Deletes a video or audio record and its stored files
///
/// Stored files are removed first on a best-effort basis; failures there are
/// logged and ignored. Only a failure to remove the document is reported.
///
/// # Response
///
/// - **200 OK** - `{ "message", "deleted_id" }`
/// - **404 Not Found** - no such record
pub async fn delete_media(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let kind: MediaKind = kind.parse()?;
    let record = get_media(&state.db, kind, &id)?
        .ok_or_else(|| AppError::NotFound("Content not found".to_string()))?;

    remove_stored(&state.storage, &record.url).await;
    if let Some(cover_url) = &record.cover_url {
        remove_stored(&state.storage, cover_url).await;
    }

    delete_media_doc(&state.db, kind, &id)?;
    state.live.publish(CollectionChanged::Media);
    tracing::info!(id = %id, kind = kind.as_str(), "media deleted");

    Ok(Json(json!({
        "message": "Content deleted successfully",
        "deleted_id": id
    })))
}
