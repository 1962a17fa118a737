use std::env;
use std::str::FromStr;
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/account/login";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Locale code used when a translation is missing in the active locale.
    pub default_locale: String,
    pub symptom_debounce_ms: u64,
    pub recommendation_cache_capacity: u64,
    pub login_path: String,
    pub doctors_per_page: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            default_locale: "ru".to_string(),
            symptom_debounce_ms: 300,
            recommendation_cache_capacity: 128,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            doctors_per_page: 20,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            api_base_url: env::var("CLINIC_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| {
                    warn!("CLINIC_API_URL not set, using default");
                    defaults.api_base_url.clone()
                }),
            default_locale: env::var("CLINIC_DEFAULT_LOCALE")
                .unwrap_or_else(|_| defaults.default_locale.clone()),
            symptom_debounce_ms: parse_var("CLINIC_SYMPTOM_DEBOUNCE_MS", defaults.symptom_debounce_ms),
            recommendation_cache_capacity: parse_var(
                "CLINIC_RECOMMENDATION_CACHE_CAPACITY",
                defaults.recommendation_cache_capacity,
            ),
            login_path: env::var("CLINIC_LOGIN_PATH")
                .unwrap_or_else(|_| defaults.login_path.clone()),
            doctors_per_page: parse_var("CLINIC_DOCTORS_PER_PAGE", defaults.doctors_per_page),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - API base URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.api_base_url.is_empty()
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
