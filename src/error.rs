//! Error kinds surfaced by the translation loader and provider.
//!
//! Load-time failures never reach the caller: network and parse errors
//! degrade to local fallback data and are only visible through
//! [`TranslationProvider::last_error`](crate::TranslationProvider::last_error).
//! Storage and environment absence are expected in headless hosts and are
//! absorbed silently.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum I18nError {
    /// Transport failure or non-2xx response from the translation endpoint.
    #[error("translation endpoint unavailable: {0}")]
    Network(String),

    /// Endpoint responded but the body was not valid JSON.
    #[error("translation payload was not valid JSON: {0}")]
    Parse(String),

    /// No persistent preference store in this host.
    #[error("preference storage unavailable")]
    StorageUnavailable,

    /// No document-like host to apply language attributes to.
    #[error("document environment unavailable")]
    EnvironmentUnavailable,

    /// Language code not in the configured available set.
    #[error("unknown language code: '{0}'")]
    UnknownLanguage(String),

    /// Configuration rejected before building a provider.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<reqwest::Error> for I18nError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            I18nError::Parse(err.to_string())
        } else {
            I18nError::Network(err.to_string())
        }
    }
}
