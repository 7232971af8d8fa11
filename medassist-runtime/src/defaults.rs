use medassist_core::config::ClientConfig;

pub const BASE_URL_ENV: &str = "MEDASSIST_BASE_URL";
pub const CONFIG_PATH_ENV: &str = "MEDASSIST_CONFIG";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

pub fn default_quick_phrases() -> Vec<String> {
    vec![
        "What are the symptoms of diabetes?".into(),
        "How can I lower my blood pressure?".into(),
        "When should I see a doctor for a fever?".into(),
        "What is a healthy resting heart rate?".into(),
    ]
}

pub fn default_client_config() -> ClientConfig {
    let mut cfg = ClientConfig::new(DEFAULT_BASE_URL);
    cfg.quick_phrases = default_quick_phrases();
    cfg
}

/// Applies environment overrides. Only the base URL is overridable.
pub fn apply_env_overrides(cfg: &mut ClientConfig) {
    apply_overrides_from(cfg, |key| std::env::var(key).ok());
}

pub fn apply_overrides_from<F>(cfg: &mut ClientConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        log::info!("base url overridden by {BASE_URL_ENV}");
        cfg.base_url = url.trim().to_string();
    }
}
