//! Seam between calext and the Google client library.

use anyhow::Result;
use async_trait::async_trait;

use crate::credential::Credential;
use crate::event::{CalendarEvent, EventQuery};

/// Everything calext needs from Google.
///
/// `GoogleCalendarApi` is the real implementation; tests substitute an
/// in-memory one.
#[async_trait]
pub trait CalendarApi: Send + Sync {
    /// Consent-screen URL that always prompts the user, even if they
    /// granted access before.
    fn authorization_url(&self) -> Result<String>;

    /// Exchange a one-time authorization code for tokens.
    async fn exchange_code(&self, code: &str, state: &str) -> Result<Credential>;

    /// Obtain a fresh access token using the credential's refresh token.
    async fn refresh(&self, credential: &Credential) -> Result<Credential>;

    async fn list_events(
        &self,
        credential: &Credential,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>>;
}
