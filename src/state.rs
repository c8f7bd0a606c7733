use std::sync::Arc;

use calext_google::CalendarService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // Built once at startup, every request goes through the same service
    service: Arc<CalendarService>,
}

impl AppState {
    pub fn new(service: CalendarService) -> Self {
        AppState {
            service: Arc::new(service),
        }
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.service
    }
}
