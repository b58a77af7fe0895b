//! Message catalogues
//!
//! English is the base catalogue. Other languages overlay it, so a key
//! missing from a translation still renders in English.

use serde_json::Value;
use std::collections::HashMap;
use std::env;

const BASE_LANGUAGE: &str = "en";

/// Shipped catalogues, keyed by language
const CATALOGUES: &[(&str, &str)] = &[
    ("en", include_str!("../i18n/en.json")),
    ("es", include_str!("../i18n/es.json")),
];

#[derive(Clone, Debug)]
pub struct I18n {
    language: &'static str,
    messages: HashMap<String, String>,
}

impl I18n {
    /// Catalogue for the locale in `LC_ALL`, `LC_MESSAGES` or `LANG`
    pub fn new() -> Self {
        Self::for_locale(&detect_locale(|name| env::var(name).ok()))
    }

    /// Catalogue for a locale such as `es_ES` or `en`; unknown languages get English
    pub fn for_locale(locale: &str) -> Self {
        let language = language_of(locale);
        let mut messages = catalogue(BASE_LANGUAGE);
        if language != BASE_LANGUAGE {
            messages.extend(catalogue(language));
        }
        Self { language, messages }
    }

    /// Language of the loaded catalogue
    pub fn language(&self) -> &str {
        self.language
    }

    pub fn t(&self, key: &str) -> String {
        self.messages
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }

    pub fn format(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut value = self.t(key);
        for (param, replacement) in params {
            value = value.replace(&format!("{{{param}}}"), replacement);
        }
        value
    }
}

/// First non-empty locale variable, normalized to `ll_cc`
fn detect_locale(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|&name| lookup(name))
        .map(|value| {
            let value = value.trim();
            value
                .split(['.', '@'])
                .next()
                .unwrap_or(value)
                .replace('-', "_")
                .to_lowercase()
        })
        .find(|locale| !locale.is_empty())
        .unwrap_or_else(|| BASE_LANGUAGE.to_string())
}

/// Shipped language matching the locale's language prefix
fn language_of(locale: &str) -> &'static str {
    let prefix = locale.split('_').next().unwrap_or(locale);
    CATALOGUES
        .iter()
        .map(|(language, _)| *language)
        .find(|language| *language == prefix)
        .unwrap_or(BASE_LANGUAGE)
}

fn catalogue(language: &str) -> HashMap<String, String> {
    let Some((_, raw)) = CATALOGUES.iter().find(|(l, _)| *l == language) else {
        return HashMap::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect(),
        _ => {
            tracing::warn!(language, "Malformed message catalogue");
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_format() {
        let i18n = I18n::for_locale("en");
        assert_eq!(i18n.t("integrations.title"), "Connections & Credentials");
        assert_eq!(
            i18n.format("agents.started", &[("id", "exec-1")]),
            "Execution started: exec-1."
        );
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        let i18n = I18n::for_locale("en");
        assert_eq!(i18n.t("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_spanish_catalogue_by_prefix() {
        let i18n = I18n::for_locale("es_mx");
        assert_eq!(i18n.language(), "es");
        assert_eq!(i18n.t("agents.loading"), "Cargando tus agentes…");
        assert_eq!(
            i18n.format("agents.started", &[("id", "exec-1")]),
            "Ejecución iniciada: exec-1."
        );
    }

    #[test]
    fn test_unknown_language_uses_english() {
        let i18n = I18n::for_locale("fr_fr");
        assert_eq!(i18n.language(), "en");
        assert_eq!(i18n.t("agents.label"), "Agent");
    }

    #[test]
    fn test_catalogues_share_keys() {
        let en = catalogue("en");
        let es = catalogue("es");
        let mut missing: Vec<&String> = en.keys().filter(|k| !es.contains_key(*k)).collect();
        missing.sort();
        assert!(missing.is_empty(), "untranslated keys: {:?}", missing);
    }

    #[test]
    fn test_detect_locale() {
        let vars = |pairs: &'static [(&'static str, &'static str)]| {
            move |name: &str| {
                pairs
                    .iter()
                    .find(|(k, _)| *k == name)
                    .map(|(_, v)| v.to_string())
            }
        };

        assert_eq!(detect_locale(vars(&[("LANG", "es_ES.UTF-8")])), "es_es");
        assert_eq!(detect_locale(vars(&[("LC_ALL", ""), ("LANG", "en-GB")])), "en_gb");
        assert_eq!(detect_locale(vars(&[])), "en");
    }
}
