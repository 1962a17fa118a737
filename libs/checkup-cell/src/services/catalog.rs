use tracing::{debug, info};

use shared_api::ClinicApiClient;
use shared_config::AppConfig;
use shared_models::{AppError, Locale};

use crate::models::{Checkup, MedicalTest};

pub const SYMPTOM_FILTER_PARAM: &str = "filter[symptoms][]";

#[derive(Clone)]
pub struct CatalogService {
    api: ClinicApiClient,
}

impl CatalogService {
    pub fn new(config: &AppConfig, locale: Locale) -> Self {
        Self::with_client(ClinicApiClient::new(config, locale))
    }

    pub fn with_client(api: ClinicApiClient) -> Self {
        Self { api }
    }

    pub fn locale(&self) -> Locale {
        self.api.locale()
    }

    /// `GET /medical-tests`
    pub async fn list_medical_tests(&self) -> Result<Vec<MedicalTest>, AppError> {
        debug!("Fetching medical tests");
        let tests: Vec<MedicalTest> = self.api.get("/medical-tests", &[], None).await?;
        info!("Fetched {} medical tests", tests.len());
        Ok(tests)
    }

    /// `GET /checkups`, one `filter[symptoms][]` per slug.
    pub async fn list_checkups<S: AsRef<str>>(&self, symptom_slugs: &[S]) -> Result<Vec<Checkup>, AppError> {
        let query: Vec<(String, String)> = symptom_slugs
            .iter()
            .map(|slug| (SYMPTOM_FILTER_PARAM.to_string(), slug.as_ref().to_string()))
            .collect();

        debug!("Fetching checkups for {} symptoms", query.len());
        let checkups: Vec<Checkup> = self.api.get("/checkups", &query, None).await?;
        info!("Fetched {} checkups", checkups.len());
        Ok(checkups)
    }

    /// Both catalogs at once, for the analyses/checkups pages.
    pub async fn load_catalog(&self) -> Result<(Vec<MedicalTest>, Vec<Checkup>), AppError> {
        let no_filter: [&str; 0] = [];
        futures::try_join!(self.list_medical_tests(), self.list_checkups(&no_filter))
    }

    pub async fn find_medical_test(&self, name: &str) -> Result<MedicalTest, AppError> {
        let tests = self.list_medical_tests().await?;
        find_by_name(tests, name, |t| &t.name)
            .ok_or_else(|| AppError::NotFound(format!("Analysis '{}' not found", name)))
    }

    pub async fn find_checkup(&self, name: &str) -> Result<Checkup, AppError> {
        let no_filter: [&str; 0] = [];
        let checkups = self.list_checkups(&no_filter).await?;
        find_by_name(checkups, name, |c| &c.title)
            .ok_or_else(|| AppError::NotFound(format!("Checkup '{}' not found", name)))
    }
}

fn find_by_name<T, F>(items: Vec<T>, name: &str, name_of: F) -> Option<T>
where
    F: Fn(&T) -> &String,
{
    let wanted = name.trim().to_lowercase();
    items
        .into_iter()
        .find(|item| name_of(item).trim().to_lowercase() == wanted)
}
