//! Google Calendar API implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_calendar::{AccessToken, Client};
use google_calendar::types::OrderBy;
use url::Url;

use crate::api::CalendarApi;
use crate::config::OAuthConfig;
use crate::credential::Credential;
use crate::event::{CalendarEvent, EventQuery};

/// `CalendarApi` backed by the `google-calendar` client.
///
/// Built once at startup from the OAuth configuration; a short-lived vendor
/// client is created per call since each one carries its own tokens.
pub struct GoogleCalendarApi {
    config: OAuthConfig,
}

impl GoogleCalendarApi {
    pub fn new(config: OAuthConfig) -> Self {
        Self { config }
    }

    /// Client for the consent and code exchange steps (no tokens yet)
    fn auth_client(&self) -> Client {
        Client::new(
            self.config.client_id.clone(),
            self.config.client_secret.clone(),
            self.config.redirect_uri.clone(),
            String::new(),
            String::new(),
        )
    }

    fn client(&self, credential: &Credential) -> Client {
        Client::new(
            self.config.client_id.clone(),
            self.config.client_secret.clone(),
            self.config.redirect_uri.clone(),
            credential.access_token.clone(),
            credential.refresh_token.clone(),
        )
    }
}

/// Make Google show the consent screen every time and hand out a refresh token.
fn force_consent(authorization_url: &str) -> Result<String> {
    let mut url =
        Url::parse(authorization_url).context("Google client built an invalid consent URL")?;

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "prompt" && k != "approval_prompt" && k != "access_type")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(pairs)
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent");

    Ok(url.to_string())
}

/// Google answers token errors with a JSON body that still decodes into an
/// `AccessToken`, only with every field empty.
fn issued_credential(tokens: &AccessToken, step: &str) -> Result<Credential> {
    if tokens.access_token.is_empty() {
        anyhow::bail!("Google returned no access token for the {step}");
    }

    Ok(tokens.into())
}

#[async_trait]
impl CalendarApi for GoogleCalendarApi {
    fn authorization_url(&self) -> Result<String> {
        let consent_url = self.auth_client().user_consent_url(&OAuthConfig::scopes());
        force_consent(&consent_url)
    }

    async fn exchange_code(&self, code: &str, state: &str) -> Result<Credential> {
        let mut client = self.auth_client();

        let tokens = client
            .get_access_token(code, state)
            .await
            .context("Failed to exchange authorization code for tokens")?;

        issued_credential(&tokens, "authorization code")
    }

    async fn refresh(&self, credential: &Credential) -> Result<Credential> {
        let client = self.client(credential);

        let mut tokens = client
            .refresh_access_token()
            .await
            .context("Failed to refresh token")?;

        // Google typically doesn't return a new refresh_token on refresh
        if tokens.refresh_token.is_empty() {
            tokens.refresh_token = credential.refresh_token.clone();
        }

        issued_credential(&tokens, "token refresh")
    }

    async fn list_events(
        &self,
        credential: &Credential,
        query: &EventQuery,
    ) -> Result<Vec<CalendarEvent>> {
        let client = self.client(credential);
        let time_min = query.time_min.to_rfc3339();

        let response = client
            .events()
            .list(
                &query.calendar_id,
                "",                 // i_cal_uid
                0,                  // max_attendees
                query.max_results,
                OrderBy::StartTime, // order_by
                "",                 // page_token
                &[],                // private_extended_property
                "",                 // q (search query)
                &[],                // shared_extended_property
                false,              // show_deleted
                false,              // show_hidden_invitations
                true,               // single_events
                "",                 // time_max
                &time_min,
                "", // time_zone
                "", // updated_min
            )
            .await
            .with_context(|| format!("Failed to fetch events from {}", query.calendar_id))?;

        tracing::debug!(
            calendar = %query.calendar_id,
            count = response.body.len(),
            "fetched events"
        );

        response
            .body
            .into_iter()
            .take(usize::try_from(query.max_results).unwrap_or(usize::MAX))
            .map(|event| {
                serde_json::to_value(event)
                    .map(CalendarEvent)
                    .context("Failed to serialize event")
            })
            .collect()
    }
}
