// Archivo: config.rs
// Propósito: configuración del proveedor leída del entorno (con `.env`).
use crate::errors::{ProviderError, Result};
use crate::retry::{Backoff, RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Parámetros del cliente del tutor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub retry: RetryPolicy,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(),
               model: DEFAULT_MODEL.to_string(),
               base_url: DEFAULT_BASE_URL.to_string(),
               retry: RetryPolicy::default() }
    }

    /// Lee `GEMINI_API_KEY` (obligatoria), `TUTOR_MODEL`, `TUTOR_BASE_URL`,
    /// `TUTOR_MAX_RETRIES` y `TUTOR_RETRY_DELAY_MS`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Variante de `from_env` con una fuente de variables inyectable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        let api_key = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty())
                                              .ok_or_else(|| ProviderError::Config("GEMINI_API_KEY no está definida".into()))?;
        let mut cfg = Self::new(api_key);
        if let Some(model) = lookup("TUTOR_MODEL") {
            cfg.model = model;
        }
        if let Some(url) = lookup("TUTOR_BASE_URL") {
            cfg.base_url = url.trim_end_matches('/').to_string();
        }
        let max_retries = match lookup("TUTOR_MAX_RETRIES") {
            Some(v) => v.trim()
                        .parse::<u32>()
                        .map_err(|e| ProviderError::Config(format!("TUTOR_MAX_RETRIES inválido '{}': {}", v, e)))?,
            None => DEFAULT_MAX_RETRIES,
        };
        let delay = match lookup("TUTOR_RETRY_DELAY_MS") {
            Some(v) => Duration::from_millis(v.trim()
                                              .parse::<u64>()
                                              .map_err(|e| ProviderError::Config(format!("TUTOR_RETRY_DELAY_MS inválido '{}': {}", v, e)))?),
            None => DEFAULT_RETRY_DELAY,
        };
        cfg.retry = RetryPolicy::new(max_retries, Backoff::Linear(delay));
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn missing_key_is_config_error() {
        let err = ProviderConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }

    #[test]
    fn defaults_apply() -> Result<()> {
        let cfg = ProviderConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")]))?;
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.retry, RetryPolicy::default());
        Ok(())
    }

    #[test]
    fn overrides_are_read() -> Result<()> {
        let cfg = ProviderConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k"),
                                                            ("TUTOR_MODEL", "gemini-2.5-flash"),
                                                            ("TUTOR_BASE_URL", "http://localhost:8080/models/"),
                                                            ("TUTOR_MAX_RETRIES", "5"),
                                                            ("TUTOR_RETRY_DELAY_MS", "250")]))?;
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert_eq!(cfg.base_url, "http://localhost:8080/models");
        assert_eq!(cfg.retry, RetryPolicy::new(5, Backoff::Linear(Duration::from_millis(250))));
        Ok(())
    }

    #[test]
    fn bad_retry_count_is_rejected() {
        let err = ProviderConfig::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k"), ("TUTOR_MAX_RETRIES", "many")])).unwrap_err();
        assert!(matches!(err, ProviderError::Config(_)));
    }
}
