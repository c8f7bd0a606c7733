//! Server settings, read from `calext.toml` and the environment.
//!
//! Environment variables (including ones from a `.env` file) override the
//! file, e.g. `GOOGLE_CLIENT_ID` sets `google_client_id`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use calext_google::OAuthConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

const CONFIG_FILE: &str = "calext";
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
/// The extension expects the server on http://localhost:3000
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TOKEN_DIR: &str = "tokens";

fn default_bind_address() -> String {
    DEFAULT_BIND_ADDRESS.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_token_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TOKEN_DIR)
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub google_client_id: String,
    pub google_client_secret: String,
    pub google_redirect_uri: String,

    /// Canvas API token. Accepted for compatibility, nothing calls Canvas yet.
    #[serde(default)]
    pub canvas_token: Option<String>,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Where the Google credential is persisted
    #[serde(default = "default_token_dir")]
    pub token_dir: PathBuf,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // A missing .env is fine, the variables may come from the real environment
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("Failed to read .env file");
            }
        }

        let config = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(Environment::default())
            .build()
            .context("Failed to load configuration")?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        config
            .try_deserialize()
            .context("Invalid configuration (GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET and GOOGLE_REDIRECT_URI are required)")
    }

    pub fn oauth(&self) -> Result<OAuthConfig> {
        Ok(OAuthConfig::new(
            self.google_client_id.clone(),
            self.google_client_secret.clone(),
            self.google_redirect_uri.clone(),
        )?)
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .with_context(|| format!("Invalid bind address: {}", self.bind_address))?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn has_canvas_token(&self) -> bool {
        self.canvas_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> config::ConfigBuilder<config::builder::DefaultState> {
        Config::builder()
            .set_override("google_client_id", "id.apps.googleusercontent.com")
            .unwrap()
            .set_override("google_client_secret", "secret")
            .unwrap()
            .set_override("google_redirect_uri", "http://localhost:3000/redirect")
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_config(base().build().unwrap()).unwrap();

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.token_dir, PathBuf::from("tokens"));
        assert_eq!(
            settings.listen_addr().unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert!(!settings.has_canvas_token());
        assert!(settings.oauth().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = base()
            .set_override("port", "8080")
            .unwrap()
            .set_override("bind_address", "0.0.0.0")
            .unwrap()
            .set_override("canvas_token", "3716~abc")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert_eq!(
            settings.listen_addr().unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
        assert!(settings.has_canvas_token());
    }

    #[test]
    fn test_missing_secret_fails() {
        let config = Config::builder()
            .set_override("google_client_id", "id")
            .unwrap()
            .set_override("google_redirect_uri", "http://localhost:3000/redirect")
            .unwrap()
            .build()
            .unwrap();

        assert!(Settings::from_config(config).is_err());
    }

    #[test]
    fn test_invalid_redirect_is_rejected_by_oauth() {
        let config = base()
            .set_override("google_redirect_uri", "not a url")
            .unwrap()
            .build()
            .unwrap();
        let settings = Settings::from_config(config).unwrap();

        assert!(settings.oauth().is_err());
    }
}
