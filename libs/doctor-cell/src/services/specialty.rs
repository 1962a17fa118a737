use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::models::Specialization;

/// Specialty display name -> backend UUID.
///
/// Static entries are seeded once; backend entries loaded with [`refresh`]
/// take precedence over static ones with the same name.
///
/// [`refresh`]: SpecialtyDirectory::refresh
#[derive(Debug, Clone, Default)]
pub struct SpecialtyDirectory {
    static_entries: HashMap<String, Uuid>,
    dynamic_entries: HashMap<String, Uuid>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl SpecialtyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Uuid)>,
        S: AsRef<str>,
    {
        Self {
            static_entries: entries
                .into_iter()
                .map(|(name, uuid)| (normalize(name.as_ref()), uuid))
                .collect(),
            dynamic_entries: HashMap::new(),
        }
    }

    pub fn refresh(&mut self, specializations: &[Specialization]) {
        self.dynamic_entries = specializations
            .iter()
            .map(|s| (normalize(&s.name), s.uuid))
            .collect();
        debug!("Specialty directory refreshed with {} entries", self.dynamic_entries.len());
    }

    pub fn has_dynamic_entries(&self) -> bool {
        !self.dynamic_entries.is_empty()
    }

    pub fn resolve(&self, name: &str) -> Option<Uuid> {
        let key = normalize(name);
        self.dynamic_entries
            .get(&key)
            .or_else(|| self.static_entries.get(&key))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_and_space_insensitive() {
        let uuid = Uuid::new_v4();
        let directory = SpecialtyDirectory::with_static([("Кардиология", uuid)]);

        assert_eq!(directory.resolve("  кардиология "), Some(uuid));
        assert_eq!(directory.resolve("Неврология"), None);
    }

    #[test]
    fn test_dynamic_entries_win() {
        let old = Uuid::new_v4();
        let fresh = Uuid::new_v4();
        let mut directory = SpecialtyDirectory::with_static([("Cardiology", old)]);
        directory.refresh(&[Specialization { uuid: fresh, name: "cardiology".to_string() }]);

        assert!(directory.has_dynamic_entries());
        assert_eq!(directory.resolve("Cardiology"), Some(fresh));
    }
}
