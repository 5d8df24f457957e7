use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::bearer_token;
use crate::database::{get_session, AppState};
use crate::error::AppError;

/// The signed-in admin, available to handlers behind [`auth_middleware`]
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub email: String,
}

/// Middleware to check for a valid admin bearer token
///
/// Requests must carry `Authorization: Bearer <token>` where the token
/// belongs to a live session. On success the session is attached to the
/// request as an [`AdminSession`] extension.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_token)
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)?;

    let session = get_session(&state.db, &token)?.ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AdminSession {
        token,
        email: session.email,
    });

    Ok(next.run(request).await)
}
