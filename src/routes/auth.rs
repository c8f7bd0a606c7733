//! Google sign-in endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

const AUTH_SUCCESS_MESSAGE: &str =
    "Authentication successful! You can close this window and return to the extension.";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth-status", get(auth_status))
        .route("/", get(start_auth))
        .route("/redirect", get(oauth_callback))
}

#[derive(Serialize)]
pub struct AuthStatus {
    pub authenticated: bool,
}

/// GET /auth-status - Whether a Google credential is stored
async fn auth_status(State(state): State<AppState>) -> Json<AuthStatus> {
    Json(AuthStatus {
        authenticated: state.calendar().is_authenticated(),
    })
}

/// GET / - Send the browser to Google's consent screen
async fn start_auth(State(state): State<AppState>) -> Result<Response, AppError> {
    let url = state.calendar().authorization_url()?;

    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}

#[derive(Deserialize)]
pub struct CallbackParams {
    pub code: String,
    #[serde(default)]
    pub state: String,
}

/// GET /redirect - OAuth callback from Google.
///
/// Failures are reported in the body with a 200, the extension only reads the text.
async fn oauth_callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> String {
    match state
        .calendar()
        .handle_authorization_code(&params.code, &params.state)
        .await
    {
        Ok(()) => AUTH_SUCCESS_MESSAGE.to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "authorization code exchange failed");
            format!("Error during authentication: {e}")
        }
    }
}
