//! Client-side translation loading with remote bundles and local fallback.
//!
//! A [`TranslationProvider`] loads a language's translation tree from a remote
//! endpoint, falls back to locally bundled per-module data when the endpoint
//! is unreachable, memoizes results per language, and exposes a dotted-key
//! lookup plus document side effects (language/direction attributes, RTL
//! class) through an injected [`Environment`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use lite_translate::{MemoryEnvironment, TranslationConfig, TranslationProvider};
//!
//! let bundles = serde_json::json!({
//!     "greeting": {
//!         "en": { "hello": "Hello" },
//!         "fr": { "hello": "Salut" }
//!     }
//! });
//!
//! let provider = TranslationProvider::mount(
//!     TranslationConfig::default(),
//!     bundles.as_object().unwrap(),
//!     Arc::new(MemoryEnvironment::new()),
//! )
//! .await?;
//!
//! assert_eq!(provider.translate("greeting.hello"), "Hello");
//! provider.change_language("fr").await;
//! ```

pub mod bundle;
pub mod config;
pub mod env;
pub mod error;
pub mod merge;
pub mod provider;

mod loader;

pub use bundle::{build_module_config, fallback_tree, ModuleConfig, ModuleLanguageData};
pub use config::{FetchStrategy, TranslationConfig};
pub use env::{Environment, MemoryEnvironment, NoopEnvironment, LANGUAGE_PREFERENCE_KEY, RTL_CLASS};
pub use error::I18nError;
pub use merge::{deep_equal, deep_merge, is_mapping};
pub use provider::{ProviderStatus, TranslationHandle, TranslationProvider};
