//! OAuth client configuration for the Google provider.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{CalendarError, CalendarResult};

/// Full read/write access to the user's calendars.
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

/// Google OAuth client credentials plus the URI Google redirects back to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> CalendarResult<Self> {
        let config = Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CalendarResult<()> {
        if self.client_id.trim().is_empty() {
            return Err(CalendarError::Config("Google client id is empty".into()));
        }
        if self.client_secret.trim().is_empty() {
            return Err(CalendarError::Config("Google client secret is empty".into()));
        }

        Url::parse(&self.redirect_uri).map_err(|e| {
            CalendarError::Config(format!(
                "Invalid redirect URI '{}': {e}",
                self.redirect_uri
            ))
        })?;

        Ok(())
    }

    pub fn scopes() -> Vec<String> {
        SCOPES.iter().map(|s| s.to_string()).collect()
    }
}
