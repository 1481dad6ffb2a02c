use std::sync::Arc;

use crate::config::Config;
use crate::upstream::SlotSource;

/// Shared state for the router: the upstream source and the startup config.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn SlotSource>,
    pub config: Arc<Config>,
}
