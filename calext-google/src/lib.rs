//! Google OAuth and Calendar access for calext.
//!
//! This crate owns everything that talks to Google:
//! - `config` for the OAuth client configuration
//! - `credential` for the on-disk token store of the single user
//! - `api` for the seam over the vendor client, with `google` as its implementation
//! - `service` for the operations the HTTP layer calls

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod event;
pub mod google;
pub mod service;

pub use api::CalendarApi;
pub use config::OAuthConfig;
pub use credential::{Credential, CredentialStore};
pub use error::{CalendarError, CalendarResult};
pub use event::{CalendarEvent, EventQuery};
pub use google::GoogleCalendarApi;
pub use service::CalendarService;
