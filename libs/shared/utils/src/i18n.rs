//! Translation lookup over nested per-locale dictionaries.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use shared_models::Locale;

const RU: &str = include_str!("../locales/ru.json");
const UZ: &str = include_str!("../locales/uz.json");
const EN: &str = include_str!("../locales/en.json");

#[derive(Debug, Clone)]
pub struct Translator {
    dictionaries: HashMap<Locale, Value>,
    default_locale: Locale,
}

impl Translator {
    pub fn new(default_locale: Locale) -> Self {
        Self {
            dictionaries: HashMap::new(),
            default_locale,
        }
    }

    /// Translator loaded with the bundled ru/uz/en dictionaries.
    pub fn builtin(default_locale: Locale) -> Self {
        let mut translator = Self::new(default_locale);
        for (locale, raw) in [(Locale::Ru, RU), (Locale::Uz, UZ), (Locale::En, EN)] {
            match serde_json::from_str::<Value>(raw) {
                Ok(dictionary) => translator.dictionaries.insert(locale, dictionary),
                Err(e) => {
                    warn!("Bundled dictionary for {} is invalid: {}", locale, e);
                    None
                }
            };
        }
        translator
    }

    pub fn with_dictionary(mut self, locale: Locale, dictionary: Value) -> Self {
        self.dictionaries.insert(locale, dictionary);
        self
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Look up `key` (dot separated) in `locale`, then in the default locale.
    /// Returns the key itself when neither has it.
    pub fn t(&self, locale: Locale, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .lookup(locale, key)
            .or_else(|| {
                if locale != self.default_locale {
                    debug!("Translation key '{}' missing in {}, using {}", key, locale, self.default_locale);
                }
                self.lookup(self.default_locale, key)
            });

        match template {
            Some(text) => interpolate(text, args),
            None => {
                debug!("Missing translation key: '{}'", key);
                key.to_string()
            }
        }
    }

    fn lookup(&self, locale: Locale, key: &str) -> Option<&str> {
        let mut node = self.dictionaries.get(&locale)?;
        for segment in key.split('.') {
            node = node.get(segment)?;
        }
        node.as_str()
    }
}

/// Single pass: substituted values are never scanned for placeholders.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let name = &after[..end];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push('{');
                result.push_str(name);
                result.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator() -> Translator {
        Translator::new(Locale::Ru)
            .with_dictionary(Locale::Ru, json!({
                "greeting": {"hello": "Привет, {name}!"},
                "only_ru": "только русский"
            }))
            .with_dictionary(Locale::En, json!({
                "greeting": {"hello": "Hello, {name}!"}
            }))
    }

    #[test]
    fn test_nested_lookup_with_interpolation() {
        let t = translator();
        assert_eq!(t.t(Locale::En, "greeting.hello", &[("name", "Ann")]), "Hello, Ann!");
        assert_eq!(t.t(Locale::Ru, "greeting.hello", &[("name", "Аня")]), "Привет, Аня!");
    }

    #[test]
    fn test_substituted_values_are_not_reinterpolated() {
        assert_eq!(
            interpolate("{a} and {b}", &[("a", "{b}"), ("b", "x")]),
            "{b} and x"
        );
        assert_eq!(interpolate("{missing} {a", &[("a", "1")]), "{missing} {a");

        let t = Translator::builtin(Locale::Ru);
        assert_eq!(
            t.t(Locale::En, "booking.specialty_unknown", &[("specialty", "{specialty}")]),
            "Specialty \"{specialty}\" was not found"
        );
    }

    #[test]
    fn test_falls_back_to_default_locale() {
        let t = translator();
        assert_eq!(t.t(Locale::En, "only_ru", &[]), "только русский");
        // no uz dictionary at all
        assert_eq!(t.t(Locale::Uz, "only_ru", &[]), "только русский");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let t = translator();
        assert_eq!(t.t(Locale::En, "greeting.bye", &[]), "greeting.bye");
        // object leaves are not strings
        assert_eq!(t.t(Locale::En, "greeting", &[]), "greeting");
    }

    #[test]
    fn test_builtin_dictionaries_load() {
        let t = Translator::builtin(Locale::Ru);
        assert_eq!(t.t(Locale::En, "recommendations.and_more", &[("count", "4")]), "and 4 more");
        assert_eq!(t.t(Locale::Ru, "booking.services.checkup", &[]), "Чекап");
        // uz has no `booking.no_doctors`
        assert_eq!(
            t.t(Locale::Uz, "booking.no_doctors", &[]),
            "Врачи по выбранной специальности не найдены"
        );
    }
}
