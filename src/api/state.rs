use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chat::Session;
use crate::core::AppConfig;

/// A session behind an async mutex: concurrent posts to the same session
/// queue in arrival order instead of racing the buffer.
pub type SharedSession = Arc<Mutex<Session>>;

/// In-memory session registry. Sessions live for the lifetime of the
/// process; nothing is persisted.
pub type SessionRegistry = Arc<Mutex<HashMap<String, SharedSession>>>;

pub struct AppState {
    pub sessions: SessionRegistry,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }
}
