use std::sync::Arc;

use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::AuthCredentials;

use crate::storage::InMemoryStore;

pub struct TestConfig {
    pub api_base_url: String,
    pub debounce_ms: u64,
    pub cache_capacity: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            debounce_ms: 20,
            cache_capacity: 16,
        }
    }
}

impl TestConfig {
    pub fn with_base_url(url: &str) -> Self {
        Self {
            api_base_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            api_base_url: self.api_base_url.clone(),
            symptom_debounce_ms: self.debounce_ms,
            recommendation_cache_capacity: self.cache_capacity,
            ..AppConfig::default()
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestSession;

impl TestSession {
    pub const TOKEN: &'static str = "test-token";

    pub fn credentials() -> AuthCredentials {
        AuthCredentials::new(Self::TOKEN, "Bearer")
    }

    pub fn logged_in_store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_credentials(&Self::credentials()))
    }

    pub fn anonymous_store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::new())
    }
}

pub struct MockClinicResponses;

impl MockClinicResponses {
    pub fn specialization(uuid: &str, name: &str) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "name": name
        })
    }

    pub fn doctor(uuid: &str, full_name: &str, specialization: &str, languages: Option<&str>) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "full_name": full_name,
            "specialization": {
                "uuid": Uuid::new_v4().to_string(),
                "name": specialization
            },
            "experience": 12,
            "qualification": "Высшая категория",
            "category": "Врач",
            "languages": languages,
            "price": 150000,
            "photo": format!("https://cdn.example.uz/doctors/{}.jpg", uuid)
        })
    }

    pub fn medical_test(uuid: &str, name: &str, price: u64) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "name": name,
            "price": price,
            "description": null
        })
    }

    pub fn checkup(
        uuid: &str,
        title: &str,
        symptoms: &[(&str, &str)],
        tests: &[&str],
        specialist: Option<&str>,
    ) -> serde_json::Value {
        let symptoms: Vec<_> = symptoms
            .iter()
            .map(|(slug, name)| json!({"slug": slug, "name": name}))
            .collect();
        let tests: Vec<_> = tests
            .iter()
            .map(|name| Self::medical_test(&Uuid::new_v4().to_string(), name, 50000))
            .collect();
        let specialization = specialist.map(|name| Self::specialization(&Uuid::new_v4().to_string(), name));

        json!({
            "uuid": uuid,
            "title": title,
            "price": 450000,
            "symptoms": symptoms,
            "medical_tests": tests,
            "specialization": specialization
        })
    }

    pub fn appointment(uuid: &str, number: &str, bookable_type: &str, start_at: &str) -> serde_json::Value {
        json!({
            "uuid": uuid,
            "number": number,
            "bookable_type": bookable_type,
            "start_at": start_at,
            "status": "pending"
        })
    }

    pub fn envelope(data: serde_json::Value) -> serde_json::Value {
        json!({ "data": data })
    }

    pub fn paginated(data: serde_json::Value, current_page: u32, last_page: u32, total: u64) -> serde_json::Value {
        json!({
            "data": data,
            "meta": {
                "current_page": current_page,
                "last_page": last_page,
                "per_page": 20,
                "total": total
            }
        })
    }

    pub fn error_response(message: &str) -> serde_json::Value {
        json!({ "message": message })
    }
}
