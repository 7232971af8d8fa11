use std::sync::Arc;

use anyhow::Context;
use medassist_core::config::ClientConfig;
use medassist_engine::client::{Backends, ClientSettings, ConversationClient};
use medassist_engine::traits::ConversationView;

use crate::config_store::ConfigStore;
use crate::defaults::apply_env_overrides;
use crate::http_backend::HttpBackend;

/// Build a runnable client from config + a view.
///
/// This keeps front ends thin.
pub fn build_client_from_config(
    cfg: &ClientConfig,
    view: Arc<dyn ConversationView>,
) -> anyhow::Result<ConversationClient> {
    cfg.validate().context("invalid client config")?;

    let backend = Arc::new(HttpBackend::from_config(cfg)?);
    log::info!("backend at {}", backend.endpoints().base_url);

    Ok(ConversationClient::new(
        ClientSettings::from_config(cfg),
        Backends::shared(backend),
        view,
    ))
}

/// Loads config from `store` (defaults when absent) and applies env overrides.
pub fn resolve_config(store: &ConfigStore) -> anyhow::Result<ClientConfig> {
    let mut cfg = store.load_or_default()?;
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}
