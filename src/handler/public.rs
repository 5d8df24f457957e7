//! Read-only endpoints behind the public site

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::media::content_snapshot;
use crate::database::{find_post_by_slug, find_video_by_title, list_posts, AppState};
use crate::error::{AppError, AppResult};
use crate::model::{ListParams, PostDetail, SiteInfo};
use crate::portfolio::{apply_filter, page_bounds, paginate, ContentFilter};
use crate::youtube::embed_url;

/// Hero, about and footer sections
///
/// The hero showreel is the newest video whose title matches the configured
/// showreel title; `showreel_url` is `null` until one is uploaded.
pub async fn site_info(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let site = &state.config.site;
    let showreel = find_video_by_title(&state.db, &site.showreel_title)?;

    Ok(Json(SiteInfo {
        name: site.name.clone(),
        tagline: site.tagline.clone(),
        contact_email: site.contact_email.clone(),
        about: site.about.clone(),
        showreel_url: showreel.map(|video| video.url),
    }))
}

/// Portfolio grid: videos and audio merged newest first
///
/// # Query Parameters
///
/// - `filter` - `all` (default), `video` or `audio`
/// - `page`, `limit` - pagination, 10 per page by default, at most 100
///
/// # Example Request
///
/// `GET /api/portfolio?filter=audio&page=1&limit=12`
pub async fn portfolio(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = ContentFilter::parse(params.filter.as_deref())?;
    let (page, limit) = page_bounds(params.page, params.limit);

    let filtered = apply_filter(content_snapshot(&state.db)?, filter);
    let total = filtered.len();
    let data = paginate(filtered, page, limit);

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "total": total,
        "data": data
    })))
}

/// Blog list, newest first
pub async fn blog_list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let (page, limit) = page_bounds(params.page, params.limit);

    let posts = list_posts(&state.db)?;
    let total = posts.len();
    let data = paginate(posts, page, limit);

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "total": total,
        "data": data
    })))
}

/// Blog detail by slug
///
/// # Response
///
/// - **200 OK** - the post plus `paragraphs` and `youtube_embed_url`
/// - **404 Not Found** - no post with that slug
pub async fn blog_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = find_post_by_slug(&state.db, &slug)?
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let paragraphs = post.content.split('\n').map(str::to_string).collect();
    let youtube_embed_url = post.youtube_url.as_deref().and_then(embed_url);

    Ok(Json(PostDetail {
        post,
        paragraphs,
        youtube_embed_url,
    }))
}
