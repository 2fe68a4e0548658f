//! Translation configuration supplied by the embedding application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::I18nError;

/// How translations are fetched from the remote endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStrategy {
    /// One request returns the full merged tree for a language.
    #[default]
    Combined,
    /// One request per module; failures fall back per module.
    PerModule,
}

/// Immutable configuration for a [`TranslationProvider`](crate::TranslationProvider).
///
/// Read-only to the library; typically deserialized from the JSON file the
/// `lite-translate-init` binary scaffolds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Language codes offered to the user, in display order.
    pub available_languages: Vec<String>,

    /// Language used when no preference is stored or the stored one is invalid.
    pub default_language: String,

    /// Languages rendered right-to-left.
    pub rtl_languages: Vec<String>,

    /// Whether resolved translations are memoized per language.
    pub enable_caching: bool,

    /// Base URL of the remote translation endpoint.
    pub api_endpoint: String,

    /// Fetch strategy for the remote endpoint.
    pub fetch_strategy: FetchStrategy,

    /// Human-readable language names, keyed by code.
    pub language_names: BTreeMap<String, String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let language_names = [("en", "English"), ("ar", "العربية"), ("fr", "Français")]
            .into_iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();

        Self {
            available_languages: vec!["en".into(), "ar".into(), "fr".into()],
            default_language: "en".into(),
            rtl_languages: vec!["ar".into()],
            enable_caching: true,
            api_endpoint: "/api/translations".into(),
            fetch_strategy: FetchStrategy::Combined,
            language_names,
        }
    }
}

impl TranslationConfig {
    /// Validate the configuration before a provider is built from it.
    pub fn validate(&self) -> Result<(), I18nError> {
        if self.available_languages.is_empty() {
            return Err(I18nError::InvalidConfig(
                "available_languages must not be empty".into(),
            ));
        }
        if !self.is_available(&self.default_language) {
            return Err(I18nError::UnknownLanguage(self.default_language.clone()));
        }
        Ok(())
    }

    /// Whether a language code is in the available set.
    pub fn is_available(&self, code: &str) -> bool {
        self.available_languages.iter().any(|l| l == code)
    }

    /// Whether a language renders right-to-left.
    pub fn is_rtl(&self, code: &str) -> bool {
        self.rtl_languages.iter().any(|l| l == code)
    }

    /// Display name for a language code, falling back to the code itself.
    pub fn language_name<'a>(&'a self, code: &'a str) -> &'a str {
        self.language_names
            .get(code)
            .map(String::as_str)
            .unwrap_or(code)
    }
}
