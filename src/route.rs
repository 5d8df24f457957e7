//! Route definitions for the showcase site
//!
//! This module configures all HTTP routes and maps them to their respective handlers.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::database::AppState;
use crate::handler::{auth, media, posts, public};
use crate::middleware::auth_middleware;
use crate::storage::MEDIA_ROUTE;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// Public:
/// - `GET /api/site` - hero/about/footer sections
/// - `GET /api/portfolio` - merged video/audio grid (`filter`, `page`, `limit`)
/// - `GET /api/blog` - blog list
/// - `GET /api/blog/{slug}` - blog detail
/// - `POST /api/auth/login` - admin sign-in
/// - `GET /media/{*key}` - stored files
///
/// Admin (bearer token required):
/// - `POST /api/auth/logout`, `GET /api/auth/me`
/// - `POST /api/admin/media/{kind}` - upload a video or audio track
/// - `GET /api/admin/content` (+ `/stream`) - merged content list
/// - `DELETE /api/admin/media/{kind}/{id}`
/// - `GET|POST /api/admin/posts` (+ `/stream`), `DELETE /api/admin/posts/{id}`
///
/// # Example Usage
///
/// ```no_run
/// # use showcase::config::Config;
/// # use showcase::database::AppState;
/// # use showcase::route::create_app;
/// let state = AppState::open(Config::from_env()).unwrap();
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    let require_admin = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let admin_routes = Router::new()
        .route("/media/{kind}", post(media::upload_media))
        .route("/media/{kind}/{id}", delete(media::delete_media))
        .route("/content", get(media::list_content))
        .route("/content/stream", get(media::stream_content))
        .route("/posts", get(posts::list_all_posts).post(posts::publish_post))
        .route("/posts/stream", get(posts::stream_posts))
        .route("/posts/{id}", delete(posts::delete_post))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(require_admin.clone());

    let session_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(require_admin)
        .route("/login", post(auth::login));

    let api_routes = Router::new()
        .route("/site", get(public::site_info))
        .route("/portfolio", get(public::portfolio))
        .route("/blog", get(public::blog_list))
        .route("/blog/{slug}", get(public::blog_detail))
        .nest("/auth", session_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .nest("/api", api_routes)
        .nest_service(MEDIA_ROUTE, ServeDir::new(state.storage.root()))
        .with_state(state)
}
