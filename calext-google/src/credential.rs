//! On-disk storage of the OAuth tokens for the single calext user.
//!
//! Tokens live in one TOML file per user id inside the token directory:
//!   tokens/user.toml

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use google_calendar::AccessToken;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};

/// The only user identity calext knows about.
pub const USER_ID: &str = "user";

const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<&AccessToken> for Credential {
    fn from(tokens: &AccessToken) -> Self {
        let expires_at = if tokens.expires_in > 0 {
            Some(Utc::now() + Duration::seconds(tokens.expires_in))
        } else {
            None
        };

        Credential {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at,
        }
    }
}

impl Credential {
    /// Counts tokens about to expire as expired, so one does not lapse mid-request.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|at| Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= at)
    }

    pub fn can_refresh(&self) -> bool {
        !self.refresh_token.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialStore {
    dir: PathBuf,
}

impl CredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub(crate) fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    fn path_for(&self, user_id: &str) -> PathBuf {
        let user_slug = user_id.replace(['/', '\\', ':'], "_");
        self.dir.join(format!("{user_slug}.toml"))
    }

    /// Returns `Ok(None)` when nothing has been stored for `user_id` yet.
    pub fn load(&self, user_id: &str) -> CalendarResult<Option<Credential>> {
        let path = self.path_for(user_id);

        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path).map_err(|e| {
            CalendarError::Store(format!(
                "Failed to read credential from {}: {e}",
                path.display()
            ))
        })?;

        let credential: Credential = toml::from_str(&contents).map_err(|e| {
            CalendarError::Store(format!(
                "Failed to parse credential from {}: {e}",
                path.display()
            ))
        })?;

        Ok(Some(credential))
    }

    /// Writes the credential, replacing whatever was stored for `user_id`.
    pub fn save(&self, user_id: &str, credential: &Credential) -> CalendarResult<()> {
        let contents = toml::to_string_pretty(credential)
            .map_err(|e| CalendarError::Store(format!("Failed to serialize credential: {e}")))?;

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CalendarError::Store(format!(
                "Failed to create directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(user_id);

        std::fs::write(&path, contents).map_err(|e| {
            CalendarError::Store(format!(
                "Failed to write credential to {}: {e}",
                path.display()
            ))
        })?;

        // Owner-only (0600), the file holds OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).map_err(
                |e| {
                    CalendarError::Store(format!(
                        "Failed to set permissions on {}: {e}",
                        path.display()
                    ))
                },
            )?;
        }

        Ok(())
    }
}
