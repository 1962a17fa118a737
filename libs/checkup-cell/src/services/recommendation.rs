use std::collections::HashSet;

use shared_models::Locale;
use shared_utils::Translator;

use crate::models::{CardSummary, Checkup, RecommendationCards};
use crate::services::symptoms::SymptomSelection;

pub const CHECKUP_LIMIT: usize = 3;
pub const TEST_LIMIT: usize = 5;
pub const RELATED_LIMIT: usize = 5;
pub const SPECIALIST_LIMIT: usize = 2;

fn dedup_in_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

impl CardSummary {
    pub fn truncated(items: Vec<String>, limit: usize) -> Self {
        let remaining = items.len().saturating_sub(limit);
        let items = items.into_iter().take(limit).collect();
        Self { items, remaining }
    }

    /// `"a, b, c and N more"` in the given locale.
    pub fn render(&self, translator: &Translator, locale: Locale) -> String {
        let joined = self.items.join(", ");
        if self.remaining == 0 {
            return joined;
        }
        let count = self.remaining.to_string();
        let more = translator.t(locale, "recommendations.and_more", &[("count", &count)]);
        format!("{} {}", joined, more)
    }
}

impl RecommendationCards {
    /// Collects the four cards from every returned checkup.
    pub fn aggregate(checkups: &[Checkup], selection: &SymptomSelection) -> Self {
        let selected_slugs: HashSet<&str> = selection.slugs().into_iter().collect();

        let titles = dedup_in_order(checkups.iter().map(|c| c.title.clone()));

        let tests = dedup_in_order(
            checkups
                .iter()
                .flat_map(|c| c.medical_tests.iter().map(|t| t.name.clone())),
        );

        let related = dedup_in_order(
            checkups
                .iter()
                .flat_map(|c| c.symptoms.iter())
                .filter(|s| !selected_slugs.contains(s.slug.as_str()) && !selection.contains(&s.name))
                .map(|s| s.name.clone()),
        );

        let specialists = dedup_in_order(
            checkups
                .iter()
                .filter_map(|c| c.specialization.as_ref().map(|s| s.name.clone())),
        );

        Self {
            checkups: CardSummary::truncated(titles, CHECKUP_LIMIT),
            tests: CardSummary::truncated(tests, TEST_LIMIT),
            related: CardSummary::truncated(related, RELATED_LIMIT),
            specialist: CardSummary::truncated(specialists, SPECIALIST_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MedicalTest, SpecialistRef, SymptomTag};
    use uuid::Uuid;

    fn checkup(title: &str, symptoms: &[(&str, &str)], tests: &[&str], specialist: Option<&str>) -> Checkup {
        Checkup {
            uuid: Uuid::new_v4(),
            title: title.to_string(),
            price: None,
            symptoms: symptoms
                .iter()
                .map(|(slug, name)| SymptomTag { slug: slug.to_string(), name: name.to_string() })
                .collect(),
            medical_tests: tests
                .iter()
                .map(|name| MedicalTest {
                    uuid: Uuid::new_v4(),
                    name: name.to_string(),
                    price: None,
                    description: None,
                })
                .collect(),
            specialization: specialist.map(|name| SpecialistRef { uuid: Uuid::new_v4(), name: name.to_string() }),
        }
    }

    #[test]
    fn test_aggregate_dedups_and_excludes_selected() {
        let mut selection = SymptomSelection::new();
        selection.toggle("Headache");

        let checkups = vec![
            checkup("Neuro", &[("headache", "Headache"), ("dizziness", "Dizziness")], &["MRI", "CBC"], Some("Neurologist")),
            checkup("Basic", &[("headache", "Headache"), ("fatigue", "Fatigue")], &["CBC", "Glucose"], Some("Neurologist")),
        ];

        let cards = RecommendationCards::aggregate(&checkups, &selection);

        assert_eq!(cards.checkups.items, vec!["Neuro", "Basic"]);
        assert_eq!(cards.tests.items, vec!["MRI", "CBC", "Glucose"]);
        assert_eq!(cards.related.items, vec!["Dizziness", "Fatigue"]);
        assert_eq!(cards.specialist.items, vec!["Neurologist"]);
        assert!(!cards.is_empty());
    }

    #[test]
    fn test_truncation_and_render() {
        let tests: Vec<String> = (1..=8).map(|i| format!("T{}", i)).collect();
        let card = CardSummary::truncated(tests, TEST_LIMIT);
        assert_eq!(card.items.len(), 5);
        assert_eq!(card.remaining, 3);

        let translator = Translator::builtin(Locale::Ru);
        assert_eq!(card.render(&translator, Locale::En), "T1, T2, T3, T4, T5 and 3 more");
        assert_eq!(card.render(&translator, Locale::Ru), "T1, T2, T3, T4, T5 и ещё 3");

        let short = CardSummary::truncated(vec!["A".to_string()], TEST_LIMIT);
        assert_eq!(short.render(&translator, Locale::En), "A");
    }

    #[test]
    fn test_no_checkups_is_empty() {
        let cards = RecommendationCards::aggregate(&[], &SymptomSelection::new());
        assert!(cards.is_empty());
        assert_eq!(cards, RecommendationCards::default());
    }
}
