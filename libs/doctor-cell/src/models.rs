use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::PageMeta;

use crate::services::formatting::{format_languages, DEFAULT_TIME_SLOTS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Specialization {
    pub uuid: Uuid,
    pub name: String,
}

/// Doctor as returned by `GET /doctors`.
#[derive(Debug, Clone, Deserialize)]
pub struct DoctorRecord {
    pub uuid: Uuid,
    pub full_name: String,
    #[serde(default)]
    pub specialization: Option<Specialization>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Comma separated, e.g. `"English, Uzbek"`.
    #[serde(default)]
    pub languages: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub experience: Option<u32>,
    pub qualification: String,
    pub category: String,
    pub languages: Vec<String>,
    pub price: Option<u64>,
    pub photo_url: Option<String>,
    /// Fixed slot list; not fetched per doctor.
    pub available_times: Vec<String>,
}

impl From<DoctorRecord> for Doctor {
    fn from(record: DoctorRecord) -> Self {
        Self {
            id: record.uuid,
            name: record.full_name,
            specialization: record
                .specialization
                .map(|s| s.name)
                .unwrap_or_default(),
            experience: record.experience,
            qualification: record.qualification.unwrap_or_default(),
            category: record.category.unwrap_or_default(),
            languages: format_languages(record.languages.as_deref()),
            price: record.price,
            photo_url: record.photo,
            available_times: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub full_name: Option<String>,
    pub specialization_uuid: Option<Uuid>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl DoctorSearchFilters {
    pub fn by_specialization(uuid: Uuid) -> Self {
        Self {
            specialization_uuid: Some(uuid),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();

        if let Some(name) = self.full_name.as_ref().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            query.push(("full_name".to_string(), name.to_string()));
        }
        if let Some(uuid) = self.specialization_uuid {
            query.push(("specialization_uuid".to_string(), uuid.to_string()));
        }
        if let Some(page) = self.page {
            query.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("per_page".to_string(), per_page.to_string()));
        }

        query
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DoctorPage {
    pub doctors: Vec<Doctor>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_to_query_skips_blank_name() {
        let uuid = Uuid::new_v4();
        let filters = DoctorSearchFilters {
            full_name: Some("  ".to_string()),
            specialization_uuid: Some(uuid),
            page: Some(2),
            per_page: None,
        };

        assert_eq!(
            filters.to_query(),
            vec![
                ("specialization_uuid".to_string(), uuid.to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_record_conversion_defaults() {
        let record: DoctorRecord = serde_json::from_value(serde_json::json!({
            "uuid": "6f1c9a52-8d2e-4c3b-a1f0-2b9e7d4c5a10",
            "full_name": "Karimova Nodira",
            "languages": null
        }))
        .unwrap();

        let doctor = Doctor::from(record);
        assert_eq!(doctor.name, "Karimova Nodira");
        assert_eq!(doctor.specialization, "");
        assert_eq!(doctor.languages, vec!["русский", "узбекский"]);
        assert_eq!(doctor.available_times.len(), DEFAULT_TIME_SLOTS.len());
    }
}
