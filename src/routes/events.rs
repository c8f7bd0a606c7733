//! Calendar event endpoints

use axum::{Json, Router, extract::State, routing::get};

use calext_google::CalendarEvent;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/test-canvas", get(upcoming_events))
}

/// GET /test-canvas - Next events on the user's primary calendar
async fn upcoming_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let events = state.calendar().upcoming_events().await?;
    Ok(Json(events))
}

#[cfg(test)]
mod tests {
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::routes::testing::{body_text, get, test_app};

    #[tokio::test]
    async fn test_unauthenticated_is_500_with_error_body() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());

        let response = get(&app, "/test-canvas").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Not authenticated. Please login first." })
        );
    }

    #[tokio::test]
    async fn test_lists_events_after_login() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());
        get(&app, "/redirect?code=good-1").await;

        let response = get(&app, "/test-canvas").await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body[0]["summary"], "HW 3 due");
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_any_origin_is_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/test-canvas")
                    .header(header::ORIGIN, "chrome-extension://abcdefghijklmnop")
                    .body(axum::body::Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );
    }
}
