//! Remote translation fetching with local fallback.
//!
//! The loader performs the network half of a language load: one combined
//! request, or one request per module depending on the configured
//! [`FetchStrategy`]. It never touches the provider's cache directly; instead
//! it reports which cache entry (if any) the result is worth memoizing under,
//! and the provider commits it. Failures never propagate: every failure path
//! degrades to the locally bundled module configuration.

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::bundle::{fallback_tree, ModuleConfig};
use crate::config::{FetchStrategy, TranslationConfig};
use crate::error::I18nError;

/// Suffix appended to per-module cache keys so combined and per-module
/// payloads for the same language never collide.
const PER_MODULE_CACHE_SUFFIX: &str = "_sorted";

/// Outcome of a single language load.
#[derive(Debug)]
pub(crate) struct LoadResult {
    /// The resolved translation tree (remote, fallback, or a mix per module).
    pub translations: Value,

    /// Cache entry to commit on success. `None` when the result came from
    /// combined-mode fallback data, which is deliberately not memoized so a
    /// recovered endpoint gets retried on the next load.
    pub cache_entry: Option<(String, Value)>,

    /// First failure encountered, surfaced as the provider's error flag.
    pub error: Option<I18nError>,
}

/// Stateless fetcher: an HTTP client plus the built local fallback config.
pub(crate) struct TranslationLoader {
    client: Client,
    modules: ModuleConfig,
}

impl TranslationLoader {
    pub fn new(modules: ModuleConfig) -> Self {
        Self {
            client: Client::new(),
            modules,
        }
    }

    /// The built local fallback configuration.
    pub fn modules(&self) -> &ModuleConfig {
        &self.modules
    }

    /// Cache key for a language under the configured fetch strategy.
    pub fn cache_key(config: &TranslationConfig, language: &str) -> String {
        match config.fetch_strategy {
            FetchStrategy::Combined => language.to_string(),
            FetchStrategy::PerModule => format!("{language}{PER_MODULE_CACHE_SUFFIX}"),
        }
    }

    /// Resolve translations for a language, without consulting any cache.
    pub async fn load(&self, config: &TranslationConfig, language: &str) -> LoadResult {
        match config.fetch_strategy {
            FetchStrategy::Combined => self.load_combined(config, language).await,
            FetchStrategy::PerModule => self.load_per_module(config, language).await,
        }
    }

    /// Combined mode: one request for the language's whole tree.
    ///
    /// On failure the entire payload is assembled from local bundles and NOT
    /// cached.
    async fn load_combined(&self, config: &TranslationConfig, language: &str) -> LoadResult {
        let url = format!("{}?lang={}", config.api_endpoint, language);

        match self.fetch_tree(&url).await {
            Ok(data) => {
                debug!(language, "fetched combined translations");
                LoadResult {
                    cache_entry: Some((Self::cache_key(config, language), data.clone())),
                    translations: data,
                    error: None,
                }
            }
            Err(err) => {
                warn!(language, %err, "translation fetch failed, falling back to local bundles");
                let mut fallback = Map::new();
                for module in self.modules.keys() {
                    fallback.insert(module.clone(), fallback_tree(&self.modules, module, language));
                }
                LoadResult {
                    translations: Value::Object(fallback),
                    cache_entry: None,
                    error: Some(err),
                }
            }
        }
    }

    /// Per-module mode: one request per configured module, all in flight at
    /// once. A failed module falls back to its local bundle without touching
    /// its siblings, and the combined result is cached even when some modules
    /// used fallback data.
    async fn load_per_module(&self, config: &TranslationConfig, language: &str) -> LoadResult {
        let fetches = self.modules.keys().map(|module| {
            let url = format!("{}/{}?lang={}", config.api_endpoint, module, language);
            async move { (module.clone(), self.fetch_tree(&url).await) }
        });

        let mut combined = Map::new();
        let mut first_error = None;

        for (module, result) in futures::future::join_all(fetches).await {
            let tree = match result {
                Ok(data) => data,
                Err(err) => {
                    warn!(language, %module, %err, "module fetch failed, using local bundle");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                    fallback_tree(&self.modules, &module, language)
                }
            };
            combined.insert(module, tree);
        }

        let translations = Value::Object(combined);
        LoadResult {
            cache_entry: Some((Self::cache_key(config, language), translations.clone())),
            translations,
            error: first_error,
        }
    }

    async fn fetch_tree(&self, url: &str) -> Result<Value, I18nError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| I18nError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::Network(format!("HTTP {status}")));
        }

        response.json::<Value>().await.map_err(I18nError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Cache Key Tests ====================

    #[test]
    fn test_combined_cache_key_is_language_code() {
        let config = TranslationConfig::default();
        assert_eq!(TranslationLoader::cache_key(&config, "fr"), "fr");
    }

    #[test]
    fn test_per_module_cache_key_has_suffix() {
        let config = TranslationConfig {
            fetch_strategy: FetchStrategy::PerModule,
            ..Default::default()
        };
        assert_eq!(TranslationLoader::cache_key(&config, "fr"), "fr_sorted");
    }

    #[test]
    fn test_cache_keys_never_collide_across_strategies() {
        let combined = TranslationConfig::default();
        let per_module = TranslationConfig {
            fetch_strategy: FetchStrategy::PerModule,
            ..Default::default()
        };
        assert_ne!(
            TranslationLoader::cache_key(&combined, "ar"),
            TranslationLoader::cache_key(&per_module, "ar")
        );
    }
}
