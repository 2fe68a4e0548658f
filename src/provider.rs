//! Translation provider: language state, load orchestration, and lookup.
//!
//! A [`TranslationProvider`] owns everything a UI needs to render translated
//! text: the current language, the resolved translation tree, the per-language
//! cache, and the loading/error flags. State is owned per instance (never a
//! process-wide singleton) so tests and multi-tenant hosts can run providers
//! side by side.
//!
//! The state machine is `Initializing` → `Loading` → `Ready`, with `Loading`
//! re-entered on every explicit language change. A load attempt always ends in
//! `Ready` — on failure the provider serves local fallback data and raises the
//! error flag instead of halting.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::bundle::{build_module_config, ModuleLanguageData};
use crate::config::TranslationConfig;
use crate::env::{Environment, LANGUAGE_PREFERENCE_KEY, RTL_CLASS};
use crate::error::I18nError;
use crate::loader::TranslationLoader;

/// Lifecycle phase of a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderStatus {
    /// Constructed but the first load has not started.
    Initializing,
    /// A load is in flight.
    Loading,
    /// Translations are available (remote or fallback).
    Ready,
}

#[derive(Debug)]
struct ProviderState {
    status: ProviderStatus,
    language: String,
    translations: Value,
    cache: HashMap<String, Value>,
    last_error: Option<I18nError>,
    /// Bumped at the start of every load; a fetch whose generation no longer
    /// matches at completion time lost a race to a newer load and is discarded.
    generation: u64,
}

struct ProviderShared {
    config: TranslationConfig,
    loader: TranslationLoader,
    env: Arc<dyn Environment>,
    state: Mutex<ProviderState>,
}

/// Per-instance translation provider.
pub struct TranslationProvider {
    shared: Arc<ProviderShared>,
}

/// Cheap handle for consumers that only need lookup and status.
///
/// Holds a weak reference: using a handle after its provider was dropped is a
/// programmer error and panics rather than silently serving stale text.
#[derive(Clone)]
pub struct TranslationHandle {
    shared: Weak<ProviderShared>,
}

impl TranslationProvider {
    /// Build and initialize a provider.
    ///
    /// Reads the persisted language preference (falling back to the configured
    /// default, and to the default again when the stored code is not in the
    /// available set), applies document attributes, and performs the initial
    /// translation load. The returned provider is always `Ready`; a failed
    /// fetch shows up in [`last_error`](Self::last_error), not as an `Err`.
    ///
    /// The only `Err` cases are configuration problems.
    pub async fn mount(
        config: TranslationConfig,
        bundles: &ModuleLanguageData,
        env: Arc<dyn Environment>,
    ) -> Result<Self, I18nError> {
        config.validate()?;

        let modules = build_module_config(bundles);
        let default_language = config.default_language.clone();

        let provider = Self {
            shared: Arc::new(ProviderShared {
                config,
                loader: TranslationLoader::new(modules),
                env,
                state: Mutex::new(ProviderState {
                    status: ProviderStatus::Initializing,
                    language: default_language,
                    translations: Value::Object(Map::new()),
                    cache: HashMap::new(),
                    last_error: None,
                    generation: 0,
                }),
            }),
        };

        let stored = match provider.shared.env.get_preference(LANGUAGE_PREFERENCE_KEY) {
            Ok(value) => value,
            Err(_) => None, // headless host; expected
        };

        let initial = match stored {
            Some(code) if provider.shared.config.is_available(&code) => code,
            Some(code) => {
                warn!(stored = %code, "stored language not available, using default");
                provider.shared.config.default_language.clone()
            }
            None => provider.shared.config.default_language.clone(),
        };

        info!(language = %initial, "mounting translation provider");
        provider.shared.state().language = initial.clone();
        provider.shared.apply_document_attributes(&initial);
        provider.shared.load_translations(&initial).await;

        Ok(provider)
    }

    /// Switch to another language.
    ///
    /// A code outside the available set reverts to the configured default, and
    /// switching to the current language is a no-op. Once the load completes
    /// (and was not outraced by a newer one) the language state, the persisted
    /// preference, and the document attributes are updated.
    pub async fn change_language(&self, requested: &str) {
        let target = if self.shared.config.is_available(requested) {
            requested.to_string()
        } else {
            warn!(requested, "requested language not available, using default");
            self.shared.config.default_language.clone()
        };

        if target == self.shared.state().language {
            return;
        }

        if !self.shared.load_translations(&target).await {
            return; // a newer load superseded this one
        }

        self.shared.state().language = target.clone();
        // Best-effort persistence; headless hosts have no storage.
        let _ = self
            .shared
            .env
            .set_preference(LANGUAGE_PREFERENCE_KEY, &target);
        self.shared.apply_document_attributes(&target);
        info!(language = %target, "language changed");
    }

    /// Handle for consumers; panics on use after the provider is dropped.
    pub fn handle(&self) -> TranslationHandle {
        TranslationHandle {
            shared: Arc::downgrade(&self.shared),
        }
    }

    /// Look up a dotted key, returning the key itself when missing.
    pub fn translate(&self, key: &str) -> String {
        self.shared.translate(None, key, key)
    }

    /// Look up a dotted key with an explicit default.
    pub fn translate_or(&self, key: &str, default: &str) -> String {
        self.shared.translate(None, key, default)
    }

    /// Look up a dotted key inside one module's subtree (per-module mode).
    pub fn translate_in(&self, module: &str, key: &str) -> String {
        self.shared.translate(Some(module), key, key)
    }

    /// The current language code.
    pub fn language(&self) -> String {
        self.shared.state().language.clone()
    }

    /// Whether the current language renders right-to-left.
    pub fn is_rtl(&self) -> bool {
        let language = self.language();
        self.shared.config.is_rtl(&language)
    }

    /// Whether a load is still in flight (or the first load has not started).
    pub fn is_loading(&self) -> bool {
        self.shared.state().status != ProviderStatus::Ready
    }

    /// Lifecycle phase.
    pub fn status(&self) -> ProviderStatus {
        self.shared.state().status
    }

    /// The failure behind the most recent fallback, if the last load degraded.
    pub fn last_error(&self) -> Option<String> {
        self.shared.state().last_error.as_ref().map(|e| e.to_string())
    }

    /// Languages offered by the configuration, in display order.
    pub fn available_languages(&self) -> &[String] {
        &self.shared.config.available_languages
    }

    /// Display name for a language code.
    pub fn language_name(&self, code: &str) -> String {
        self.shared.config.language_name(code).to_string()
    }
}

impl TranslationHandle {
    fn shared(&self) -> Arc<ProviderShared> {
        self.shared
            .upgrade()
            .expect("TranslationHandle used after its TranslationProvider was dropped")
    }

    /// Look up a dotted key, returning the key itself when missing.
    ///
    /// # Panics
    /// Panics if the provider behind this handle has been dropped.
    pub fn translate(&self, key: &str) -> String {
        self.shared().translate(None, key, key)
    }

    /// Look up a dotted key with an explicit default.
    ///
    /// # Panics
    /// Panics if the provider behind this handle has been dropped.
    pub fn translate_or(&self, key: &str, default: &str) -> String {
        self.shared().translate(None, key, default)
    }

    /// Look up a dotted key inside one module's subtree.
    ///
    /// # Panics
    /// Panics if the provider behind this handle has been dropped.
    pub fn translate_in(&self, module: &str, key: &str) -> String {
        self.shared().translate(Some(module), key, key)
    }

    /// The current language code.
    ///
    /// # Panics
    /// Panics if the provider behind this handle has been dropped.
    pub fn language(&self) -> String {
        self.shared().state().language.clone()
    }

    /// Whether a load is still in flight.
    ///
    /// # Panics
    /// Panics if the provider behind this handle has been dropped.
    pub fn is_loading(&self) -> bool {
        self.shared().state().status != ProviderStatus::Ready
    }
}

impl ProviderShared {
    fn state(&self) -> MutexGuard<'_, ProviderState> {
        self.state.lock().expect("provider state lock poisoned")
    }

    /// Load translations for a language and commit them to state.
    ///
    /// Returns `false` when the result was discarded because a newer load
    /// started while the fetch was in flight. The lock is never held across
    /// the fetch.
    async fn load_translations(&self, language: &str) -> bool {
        let cache_key = TranslationLoader::cache_key(&self.config, language);

        let generation = {
            let mut state = self.state();
            state.status = ProviderStatus::Loading;
            state.generation += 1;

            if self.config.enable_caching {
                if let Some(hit) = state.cache.get(&cache_key).cloned() {
                    debug!(language, "translation cache hit");
                    state.translations = hit;
                    state.last_error = None;
                    state.status = ProviderStatus::Ready;
                    return true;
                }
            }

            state.generation
        };

        let result = self.loader.load(&self.config, language).await;

        let mut state = self.state();
        if state.generation != generation {
            debug!(language, "discarding stale translation load");
            return false;
        }

        if self.config.enable_caching {
            if let Some((key, value)) = result.cache_entry {
                state.cache.insert(key, value);
            }
        }
        state.translations = result.translations;
        state.last_error = result.error;
        state.status = ProviderStatus::Ready;
        true
    }

    /// Walk the current tree by dotted key; degrade to the default on any miss.
    fn translate(&self, module: Option<&str>, key: &str, default: &str) -> String {
        let state = self.state();

        let mut current: &Value = &state.translations;
        if let Some(module) = module {
            match current.get(module) {
                Some(subtree) => current = subtree,
                None => return default.to_string(),
            }
        }

        for segment in key.split('.') {
            match current.get(segment) {
                Some(next) => current = next,
                None => return default.to_string(),
            }
        }

        match current.as_str() {
            Some(text) => text.to_string(),
            None => default.to_string(),
        }
    }

    /// Best-effort document side effects; absent environments are skipped.
    fn apply_document_attributes(&self, language: &str) {
        let is_rtl = self.config.is_rtl(language);
        let direction = if is_rtl { "rtl" } else { "ltr" };

        let _ = self.env.set_document_language(language);
        let _ = self.env.set_document_direction(direction);
        let _ = self.env.toggle_document_class(RTL_CLASS, is_rtl);
    }
}
