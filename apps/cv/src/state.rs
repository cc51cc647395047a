use std::sync::Arc;

use crate::config::Config;
use crate::render::PageRenderer;
use crate::store::ProfileSource;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Where the newest profile comes from. Default: `SupabaseProfileSource`.
    pub profiles: Arc<dyn ProfileSource>,
    pub renderer: Arc<PageRenderer>,
}
