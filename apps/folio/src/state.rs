use std::sync::Arc;

use crate::config::Config;
use crate::gateway::BackendGateway;

/// Shared handles passed to the editor shell and cloned into background tasks.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn BackendGateway>,
    pub config: Config,
}
