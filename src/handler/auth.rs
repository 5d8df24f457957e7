use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::auth::{check_credentials, start_session};
use crate::database::{delete_session, AppState};
use crate::error::AppResult;
use crate::middleware::AdminSession;
use crate::model::{LoginRequest, LoginResponse};

/// Signs the admin in
///
/// # Request Body
///
/// ```json
/// { "email": "admin@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// - **200 OK** - `{ "token", "email", "expires_at" }`
/// - **401 Unauthorized** - wrong email/password or no admin configured
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = match check_credentials(&state.config, &payload.email, &payload.password) {
        Ok(email) => email,
        Err(err) => {
            tracing::info!(email = %payload.email, "admin sign-in rejected");
            return Err(err);
        }
    };

    let (token, session) = start_session(&state.db, &email, state.config.session_ttl_hours)?;
    tracing::info!(email = %email, "admin signed in");

    Ok(Json(LoginResponse {
        token,
        email: session.email,
        expires_at: session.expires_at,
    }))
}

/// Revokes the token used for this request
pub async fn logout(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
) -> AppResult<impl IntoResponse> {
    delete_session(&state.db, &admin.token)?;
    tracing::info!(email = %admin.email, "admin signed out");

    Ok((StatusCode::OK, Json(json!({ "message": "Signed out" }))))
}

pub async fn me(Extension(admin): Extension<AdminSession>) -> impl IntoResponse {
    Json(json!({ "email": admin.email }))
}
