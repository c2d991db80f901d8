use std::sync::Arc;

use crate::config::Config;
use crate::credentials::CredentialStore;
use crate::generation::session::{InFlight, SharedSession};
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Backend used for generation. Default: GeminiClient; tests swap in a stub.
    pub generator: Arc<dyn TextGenerator>,
    pub credentials: CredentialStore,
    pub session: SharedSession,
    pub in_flight: InFlight,
}

impl AppState {
    pub fn new(config: Config, generator: Arc<dyn TextGenerator>, credentials: CredentialStore) -> Self {
        Self {
            config,
            generator,
            credentials,
            session: SharedSession::default(),
            in_flight: InFlight::default(),
        }
    }
}
