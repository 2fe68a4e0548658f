//! Local translation bundles and the per-module fallback configuration.
//!
//! Applications embed raw per-module, per-language translation trees. Before
//! they can serve as fallback data, every non-base language is deep-merged
//! onto the base language so that keys the translation is missing resolve to
//! the base language's text instead of disappearing.

use serde_json::{Map, Value};

use crate::merge::deep_merge;

/// The base language every other language falls back to.
pub const BASE_LANGUAGE: &str = "en";

/// Raw per-module translation data: module name → language code → tree.
///
/// This is the shape applications author by hand (or generate from their
/// translation files); [`build_module_config`] normalizes it.
pub type ModuleLanguageData = Map<String, Value>;

/// Normalized per-module configuration: module name → language code → tree,
/// where every non-base language has been merged onto the base.
pub type ModuleConfig = Map<String, Value>;

/// Build the normalized module configuration from raw per-language data.
///
/// For each module the base language entry is passed through unmodified (an
/// empty object when absent), and every other language becomes
/// `deep_merge(base, raw)`. Every language present in the input appears in the
/// output, even when its merged tree is identical to the base; callers can
/// rely on a uniform shape regardless of how complete a translation is.
///
/// Pure and total: malformed (non-object) language tables are passed through
/// untouched rather than rejected.
pub fn build_module_config(data: &ModuleLanguageData) -> ModuleConfig {
    let mut modules = Map::new();

    for (module_name, langs) in data {
        let Some(lang_map) = langs.as_object() else {
            modules.insert(module_name.clone(), langs.clone());
            continue;
        };

        let base = lang_map
            .get(BASE_LANGUAGE)
            .cloned()
            .unwrap_or(Value::Object(Map::new()));

        let mut config = Map::new();
        config.insert(BASE_LANGUAGE.to_string(), base.clone());

        for (lang, raw) in lang_map {
            if lang == BASE_LANGUAGE {
                continue;
            }
            config.insert(lang.clone(), deep_merge(&base, raw));
        }

        modules.insert(module_name.clone(), Value::Object(config));
    }

    modules
}

/// Pick a module's fallback tree for a language from a built [`ModuleConfig`].
///
/// Prefers the merged entry for the requested language, falls back to the base
/// language's entry, and finally to an empty object so that lookups degrade to
/// their defaults instead of failing.
pub fn fallback_tree(config: &ModuleConfig, module: &str, language: &str) -> Value {
    config
        .get(module)
        .and_then(Value::as_object)
        .and_then(|langs| langs.get(language).or_else(|| langs.get(BASE_LANGUAGE)))
        .cloned()
        .unwrap_or(Value::Object(Map::new()))
}
