use std::sync::Arc;

use nicogamma_persist::PersistClient;
use nicogamma_protocol::{Clock, EscapeMode, ReplayEngine, SystemClock};

use crate::config::Config;

/// Shared application state passed to all handlers
///
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub persist: Arc<PersistClient>,
    pub engine: ReplayEngine,
    pub escape_mode: EscapeMode,
}

impl AppState {
    pub fn new(config: Config, persist: PersistClient) -> Self {
        Self::with_clock(config, persist, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, persist: PersistClient, clock: Arc<dyn Clock>) -> Self {
        let engine = ReplayEngine::new(Arc::new(persist.threads().clone()), clock);
        let escape_mode = config.protocol.escape_mode();

        Self {
            config: Arc::new(config),
            persist: Arc::new(persist),
            engine,
            escape_mode,
        }
    }
}
