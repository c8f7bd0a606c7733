//! Router fixtures backed by a fake Google.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{Router, body::Body, http::Request, response::Response};
use calext_google::{
    CalendarApi, CalendarEvent, CalendarService, Credential, CredentialStore, EventQuery,
};
use tower::ServiceExt;

use crate::state::AppState;

/// Accepts authorization codes starting with "good"; every listing returns one event.
pub struct StubApi;

#[async_trait]
impl CalendarApi for StubApi {
    fn authorization_url(&self) -> Result<String> {
        Ok("https://accounts.google.com/o/oauth2/v2/auth?client_id=test\
            &redirect_uri=http://localhost:3000/redirect&access_type=offline&prompt=consent"
            .to_string())
    }

    async fn exchange_code(&self, code: &str, _state: &str) -> Result<Credential> {
        if !code.starts_with("good") {
            anyhow::bail!("Failed to exchange authorization code for tokens: invalid_grant");
        }
        Ok(Credential {
            access_token: format!("access-{code}"),
            refresh_token: "refresh".to_string(),
            expires_at: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
        })
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        Ok(credential.clone())
    }

    async fn list_events(
        &self,
        _credential: &Credential,
        _query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>> {
        Ok(vec![CalendarEvent(serde_json::json!({
            "id": "evt1",
            "summary": "HW 3 due",
            "start": { "dateTime": "2026-10-20T23:59:00Z" },
        }))])
    }
}

pub fn test_app(token_dir: &Path) -> Router {
    let service = CalendarService::new(Arc::new(StubApi), CredentialStore::new(token_dir));
    crate::routes::app(AppState::new(service))
}

pub async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
