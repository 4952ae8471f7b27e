use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// The resume core is stateless, so only configuration is carried.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
}
