//! Application context
//!
//! One explicit object owns the session, the conversation and the router.
//! The shell creates it at start-up and hands references to whatever needs
//! them; nothing here is global.

use crate::api::ApiClient;
use crate::error::ApiResult;
use crate::session::SessionStore;
use carelink_core::config::Config;
use carelink_core::conversation::ConversationStore;
use carelink_core::routes::{default_routes, Navigation, RouteTable, Router, ViewLoader};
use carelink_core::storage::{open_storage, KeyValueStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct AppContext<L: ViewLoader> {
    config: Config,
    session: SessionStore,
    conversation: RwLock<ConversationStore>,
    router: Router<L>,
}

impl<L: ViewLoader> AppContext<L> {
    /// Start the application with the configured storage and default routes
    pub fn start(config: Config, loader: L) -> ApiResult<Self> {
        let storage = open_storage(&config.storage)?;
        Self::with_storage(config, storage, loader)
    }

    /// Start the application over an explicit storage backend
    pub fn with_storage(
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        loader: L,
    ) -> ApiResult<Self> {
        let table = RouteTable::new(default_routes())?;
        let router = Router::new(table, loader, config.routes.login_route.clone())?;
        let session = SessionStore::new(ApiClient::from_config(&config.api), storage)?;

        info!(
            base_url = %config.api.base_url,
            authenticated = session.is_authenticated(),
            "Application context started"
        );

        Ok(Self {
            config,
            session,
            conversation: RwLock::new(ConversationStore::new()),
            router,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn conversation(&self) -> &RwLock<ConversationStore> {
        &self.conversation
    }

    pub fn router(&self) -> &Router<L> {
        &self.router
    }

    /// Navigate with the guard fed from the current session
    pub async fn navigate(&self, path: &str) -> carelink_core::Result<Navigation<L::View>> {
        self.router
            .navigate(path, self.session.is_authenticated())
            .await
    }

    /// Stop the application; the conversation is discarded, the session
    /// record stays in storage for the next start
    pub fn shutdown(self) {
        let messages = self.conversation.read().len();
        info!(messages, "Application context stopped");
    }
}
