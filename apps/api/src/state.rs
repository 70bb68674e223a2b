use crate::config::Config;
use crate::latency::Latency;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub latency: Latency,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store,
            latency: Latency::new(config.latency_scale),
            config,
        }
    }

    /// State over the given store with latency disabled.
    #[cfg(test)]
    pub fn fake(store: Store) -> Self {
        Self::new(
            store,
            Config {
                port: 0,
                rust_log: "debug".to_string(),
                latency_scale: 0.0,
                seed_demo_data: false,
            },
        )
    }
}
