use std::sync::Arc;

use crate::core::Config;
use crate::db::Store;

/// State shared by every handler
///
/// Cloning is cheap. The store only carries connection options; handlers
/// open their own connection per request.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Store,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        let store = Store::open(&config.database_path);
        Self {
            config: Arc::new(config),
            store,
        }
    }
}
