use std::sync::Arc;

use vita_config::ServerConfig;
use vita_gateway::Gateway;
use vita_session::SessionManager;

use crate::mail::ContactRelay;

/// Shared application state, created in main and handed to the router
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub sessions: Arc<SessionManager>,
    /// None when the contact relay is disabled by configuration
    pub relay: Option<Arc<dyn ContactRelay>>,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(
        gateway: Arc<Gateway>,
        sessions: Arc<SessionManager>,
        relay: Option<Arc<dyn ContactRelay>>,
        config: ServerConfig,
    ) -> Self {
        Self {
            gateway,
            sessions,
            relay,
            config,
        }
    }
}
