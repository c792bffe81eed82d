use std::sync::Arc;

use crate::config::Config;
use crate::keywords::tagger::Tagger;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Process-wide tagger, loaded once at startup and shared read-only.
    /// Injected as a trait object so tests can swap in a scripted tagger.
    pub tagger: Arc<dyn Tagger>,
}
