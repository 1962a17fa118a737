use serde::Serialize;
use tracing::warn;

use shared_models::Locale;

pub const MAX_SYMPTOMS: usize = 3;

struct SymptomEntry {
    slug: &'static str,
    ru: &'static str,
    uz: &'static str,
    en: &'static str,
}

impl SymptomEntry {
    fn name(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Ru => self.ru,
            Locale::Uz => self.uz,
            Locale::En => self.en,
        }
    }
}

const SYMPTOMS: &[SymptomEntry] = &[
    SymptomEntry { slug: "headache", ru: "Головная боль", uz: "Bosh og'rig'i", en: "Headache" },
    SymptomEntry { slug: "fatigue", ru: "Усталость", uz: "Charchoq", en: "Fatigue" },
    SymptomEntry { slug: "chest-pain", ru: "Боль в груди", uz: "Ko'krakdagi og'riq", en: "Chest pain" },
    SymptomEntry { slug: "shortness-of-breath", ru: "Одышка", uz: "Nafas qisishi", en: "Shortness of breath" },
    SymptomEntry { slug: "dizziness", ru: "Головокружение", uz: "Bosh aylanishi", en: "Dizziness" },
    SymptomEntry { slug: "joint-pain", ru: "Боль в суставах", uz: "Bo'g'im og'rig'i", en: "Joint pain" },
    SymptomEntry { slug: "abdominal-pain", ru: "Боль в животе", uz: "Qorin og'rig'i", en: "Abdominal pain" },
    SymptomEntry { slug: "cough", ru: "Кашель", uz: "Yo'tal", en: "Cough" },
    SymptomEntry { slug: "fever", ru: "Повышенная температура", uz: "Isitma", en: "Fever" },
    SymptomEntry { slug: "insomnia", ru: "Бессонница", uz: "Uyqusizlik", en: "Insomnia" },
    SymptomEntry { slug: "weight-change", ru: "Изменение веса", uz: "Vazn o'zgarishi", en: "Weight change" },
    SymptomEntry { slug: "high-blood-pressure", ru: "Повышенное давление", uz: "Yuqori qon bosimi", en: "High blood pressure" },
];

/// Fixed list of selectable symptoms and their backend slugs.
pub struct SymptomTable;

impl SymptomTable {
    pub fn names(locale: Locale) -> Vec<&'static str> {
        SYMPTOMS.iter().map(|s| s.name(locale)).collect()
    }

    /// Slug for a display name in any supported locale.
    pub fn slug_for(name: &str) -> Option<&'static str> {
        let name = name.trim();
        SYMPTOMS
            .iter()
            .find(|s| Locale::ALL.iter().any(|l| s.name(*l) == name))
            .map(|s| s.slug)
    }

    pub fn name_for(slug: &str, locale: Locale) -> Option<&'static str> {
        SYMPTOMS.iter().find(|s| s.slug == slug).map(|s| s.name(locale))
    }
}

/// Up to [`MAX_SYMPTOMS`] symptom names in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomSelection {
    selected: Vec<String>,
}

impl SymptomSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes a selected symptom or adds a new one.
    /// Adding past the cap is a no-op. Returns whether the selection changed.
    pub fn toggle(&mut self, name: &str) -> bool {
        if let Some(index) = self.selected.iter().position(|s| s == name) {
            self.selected.remove(index);
            return true;
        }
        if self.selected.len() >= MAX_SYMPTOMS {
            return false;
        }
        self.selected.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn names(&self) -> &[String] {
        &self.selected
    }

    /// Order independent: `{A, B}` and `{B, A}` give the same key.
    pub fn cache_key(&self) -> String {
        let mut sorted = self.selected.clone();
        sorted.sort();
        sorted.join("|")
    }

    pub fn slugs(&self) -> Vec<&'static str> {
        self.selected
            .iter()
            .filter_map(|name| {
                let slug = SymptomTable::slug_for(name);
                if slug.is_none() {
                    warn!("No slug for symptom '{}'", name);
                }
                slug
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_order_independent() {
        let mut ab = SymptomSelection::new();
        ab.toggle("Кашель");
        ab.toggle("Головная боль");

        let mut ba = SymptomSelection::new();
        ba.toggle("Головная боль");
        ba.toggle("Кашель");

        assert_eq!(ab.cache_key(), ba.cache_key());
        assert_eq!(ab.cache_key(), "Головная боль|Кашель");
    }

    #[test]
    fn test_fourth_symptom_is_noop() {
        let mut selection = SymptomSelection::new();
        assert!(selection.toggle("Headache"));
        assert!(selection.toggle("Fatigue"));
        assert!(selection.toggle("Cough"));
        let before = selection.clone();

        assert!(!selection.toggle("Fever"));
        assert_eq!(selection, before);
        assert_eq!(selection.len(), MAX_SYMPTOMS);
    }

    #[test]
    fn test_reselect_removes_without_duplicates() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Cough");
        selection.toggle("Fever");
        selection.toggle("Cough");

        assert_eq!(selection.names(), &["Fever".to_string()]);
        assert!(!selection.contains("Cough"));

        // removal still works at the cap
        selection.toggle("Cough");
        selection.toggle("Headache");
        assert!(selection.toggle("Fever"));
        assert_eq!(selection.len(), 2);
    }

    #[test]
    fn test_slug_lookup_across_locales() {
        assert_eq!(SymptomTable::slug_for("Одышка"), Some("shortness-of-breath"));
        assert_eq!(SymptomTable::slug_for("Yo'tal"), Some("cough"));
        assert_eq!(SymptomTable::slug_for(" Fever "), Some("fever"));
        assert_eq!(SymptomTable::slug_for("Sneezing"), None);
        assert_eq!(SymptomTable::name_for("insomnia", Locale::Ru), Some("Бессонница"));
        assert_eq!(SymptomTable::names(Locale::En).len(), 12);
    }

    #[test]
    fn test_unknown_symptoms_have_no_slug() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Headache");
        selection.toggle("Something odd");
        assert_eq!(selection.slugs(), vec!["headache"]);
    }
}
