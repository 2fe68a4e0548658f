//! Host environment port: document attributes and preference storage.
//!
//! The provider runs in anything from a browser shell to a headless test, so
//! every host capability is injected behind this trait instead of probed for
//! inline. All operations are best-effort: the provider suppresses
//! [`I18nError::StorageUnavailable`] and [`I18nError::EnvironmentUnavailable`]
//! rather than letting a missing host fail a language change.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::I18nError;

/// Storage key under which the chosen language code is persisted.
pub const LANGUAGE_PREFERENCE_KEY: &str = "lang";

/// Class toggled on the root document element for right-to-left languages.
pub const RTL_CLASS: &str = "rtl";

/// Capabilities of the embedding host.
///
/// Must be safe to call from multiple threads; implementations guard their
/// own state.
pub trait Environment: Send + Sync {
    /// Read a persisted preference value.
    fn get_preference(&self, key: &str) -> Result<Option<String>, I18nError>;

    /// Persist a preference value.
    fn set_preference(&self, key: &str, value: &str) -> Result<(), I18nError>;

    /// Set the document's language attribute.
    fn set_document_language(&self, code: &str) -> Result<(), I18nError>;

    /// Set the document's text direction attribute (`"rtl"` or `"ltr"`).
    fn set_document_direction(&self, direction: &str) -> Result<(), I18nError>;

    /// Toggle a class on the root document element.
    fn toggle_document_class(&self, class: &str, enabled: bool) -> Result<(), I18nError>;
}

/// Environment for hosts with no document and no storage.
///
/// Storage reads report [`I18nError::StorageUnavailable`] and document writes
/// report [`I18nError::EnvironmentUnavailable`]; the provider absorbs both.
#[derive(Debug, Default)]
pub struct NoopEnvironment;

impl Environment for NoopEnvironment {
    fn get_preference(&self, _key: &str) -> Result<Option<String>, I18nError> {
        Err(I18nError::StorageUnavailable)
    }

    fn set_preference(&self, _key: &str, _value: &str) -> Result<(), I18nError> {
        Err(I18nError::StorageUnavailable)
    }

    fn set_document_language(&self, _code: &str) -> Result<(), I18nError> {
        Err(I18nError::EnvironmentUnavailable)
    }

    fn set_document_direction(&self, _direction: &str) -> Result<(), I18nError> {
        Err(I18nError::EnvironmentUnavailable)
    }

    fn toggle_document_class(&self, _class: &str, _enabled: bool) -> Result<(), I18nError> {
        Err(I18nError::EnvironmentUnavailable)
    }
}

/// In-memory environment: a fake document plus key-value storage.
///
/// Used by tests and by embedders that render their own chrome but still want
/// language/direction bookkeeping.
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    inner: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    storage: HashMap<String, String>,
    document_language: Option<String>,
    document_direction: Option<String>,
    classes: HashMap<String, bool>,
}

impl MemoryEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a stored preference, as if persisted by a previous session.
    pub fn with_preference(key: &str, value: &str) -> Self {
        let env = Self::new();
        env.inner
            .lock()
            .expect("memory environment lock")
            .storage
            .insert(key.to_string(), value.to_string());
        env
    }

    pub fn document_language(&self) -> Option<String> {
        self.lock().document_language.clone()
    }

    pub fn document_direction(&self) -> Option<String> {
        self.lock().document_direction.clone()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.get(class).copied().unwrap_or(false)
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.lock().storage.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().expect("memory environment lock")
    }
}

impl Environment for MemoryEnvironment {
    fn get_preference(&self, key: &str) -> Result<Option<String>, I18nError> {
        Ok(self.lock().storage.get(key).cloned())
    }

    fn set_preference(&self, key: &str, value: &str) -> Result<(), I18nError> {
        self.lock().storage.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_document_language(&self, code: &str) -> Result<(), I18nError> {
        self.lock().document_language = Some(code.to_string());
        Ok(())
    }

    fn set_document_direction(&self, direction: &str) -> Result<(), I18nError> {
        self.lock().document_direction = Some(direction.to_string());
        Ok(())
    }

    fn toggle_document_class(&self, class: &str, enabled: bool) -> Result<(), I18nError> {
        self.lock().classes.insert(class.to_string(), enabled);
        Ok(())
    }
}
