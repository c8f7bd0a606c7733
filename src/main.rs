//! calext-server - backend for the Canvas calendar browser extension.
//!
//! Signs the user in with Google and serves their upcoming calendar events
//! to the extension over HTTP.

mod routes;
mod settings;
mod singleton;
mod state;

use std::sync::Arc;

use anyhow::Result;
use calext_google::{CalendarService, CredentialStore, GoogleCalendarApi};
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .init();

    let settings = Settings::load()?;

    // Ensure only one instance owns the token directory
    let _lock = singleton::acquire_lock(&settings.token_dir)?;

    if settings.has_canvas_token() {
        tracing::info!("Canvas token configured (not used by any endpoint)");
    }

    let api = GoogleCalendarApi::new(settings.oauth()?);
    let store = CredentialStore::new(settings.token_dir.clone());
    let state = AppState::new(CalendarService::new(Arc::new(api), store));

    let app = routes::app(state);

    let addr = settings.listen_addr()?;
    tracing::info!("calext-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
