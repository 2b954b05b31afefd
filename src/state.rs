use std::sync::Arc;

use crate::auth::Authenticator;
use crate::config::AppConfig;
use crate::database::DatabaseManager;
use crate::services::ShowService;

/// Shared per-request state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub shows: ShowService,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(config: &AppConfig, db: DatabaseManager) -> Self {
        Self {
            shows: ShowService::new(db),
            auth: Arc::new(Authenticator::new(&config.security)),
        }
    }
}
