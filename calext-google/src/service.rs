//! The operations behind calext's HTTP endpoints.

use std::sync::Arc;

use chrono::Utc;

use crate::api::CalendarApi;
use crate::credential::{Credential, CredentialStore, USER_ID};
use crate::error::{CalendarError, CalendarResult};
use crate::event::{CalendarEvent, EventQuery};

/// Owns the Google client seam and the credential store of the single user.
pub struct CalendarService {
    api: Arc<dyn CalendarApi>,
    store: CredentialStore,
}

impl CalendarService {
    pub fn new(api: Arc<dyn CalendarApi>, store: CredentialStore) -> Self {
        Self { api, store }
    }

    /// Whether a usable credential is stored. Store errors count as "no".
    pub fn is_authenticated(&self) -> bool {
        match self.store.load(USER_ID) {
            Ok(Some(credential)) => !credential.access_token.is_empty(),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored credential");
                false
            }
        }
    }

    pub fn authorization_url(&self) -> CalendarResult<String> {
        self.api
            .authorization_url()
            .map_err(|e| CalendarError::Config(format!("{e:#}")))
    }

    /// Exchange the code Google redirected back with, replacing any stored credential.
    pub async fn handle_authorization_code(&self, code: &str, state: &str) -> CalendarResult<()> {
        let credential = self
            .api
            .exchange_code(code, state)
            .await
            .map_err(CalendarError::Upstream)?;

        self.store.save(USER_ID, &credential)?;
        tracing::info!(user = USER_ID, "stored new Google credential");

        Ok(())
    }

    /// Up to ten upcoming events from the primary calendar.
    pub async fn upcoming_events(&self) -> CalendarResult<Vec<CalendarEvent>> {
        let credential = self
            .store
            .load(USER_ID)?
            .ok_or(CalendarError::NotAuthenticated)?;

        let credential = self.refresh_if_needed(credential).await?;

        let query = EventQuery::upcoming(Utc::now());
        self.api
            .list_events(&credential, &query)
            .await
            .map_err(CalendarError::Upstream)
    }

    async fn refresh_if_needed(&self, credential: Credential) -> CalendarResult<Credential> {
        if !credential.is_expired() || !credential.can_refresh() {
            return Ok(credential);
        }

        tracing::info!(user = USER_ID, "access token expired, refreshing");

        let refreshed = self
            .api
            .refresh(&credential)
            .await
            .map_err(CalendarError::Upstream)?;

        // The stored credential is only replaced by one Google actually issued
        if refreshed.access_token.is_empty() {
            return Err(CalendarError::Upstream(anyhow::anyhow!(
                "Google returned no access token for the token refresh"
            )));
        }
        self.store.save(USER_ID, &refreshed)?;

        Ok(refreshed)
    }
}
