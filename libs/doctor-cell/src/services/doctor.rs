use tracing::{debug, info};
use uuid::Uuid;

use shared_api::ClinicApiClient;
use shared_config::AppConfig;
use shared_models::{AppError, Locale};

use crate::models::{Doctor, DoctorPage, DoctorRecord, DoctorSearchFilters, Specialization};

#[derive(Clone)]
pub struct DoctorService {
    api: ClinicApiClient,
    per_page: u32,
}

impl DoctorService {
    pub fn new(config: &AppConfig, locale: Locale) -> Self {
        Self::with_client(ClinicApiClient::new(config, locale), config.doctors_per_page)
    }

    pub fn with_client(api: ClinicApiClient, per_page: u32) -> Self {
        Self { api, per_page }
    }

    pub fn api(&self) -> &ClinicApiClient {
        &self.api
    }

    /// `GET /specializations`
    pub async fn list_specializations(&self) -> Result<Vec<Specialization>, AppError> {
        debug!("Fetching specializations");

        let specializations: Vec<Specialization> = self.api.get("/specializations", &[], None).await?;

        info!("Fetched {} specializations", specializations.len());
        Ok(specializations)
    }

    /// `GET /doctors` with name/specialization filters, one page.
    pub async fn search_doctors(&self, filters: &DoctorSearchFilters) -> Result<DoctorPage, AppError> {
        debug!("Searching doctors with filters: {:?}", filters);

        let mut filters = filters.clone();
        if filters.per_page.is_none() {
            filters.per_page = Some(self.per_page);
        }

        let envelope = self
            .api
            .get_envelope::<Vec<DoctorRecord>>("/doctors", &filters.to_query(), None)
            .await?;

        let doctors: Vec<Doctor> = envelope.data.into_iter().map(Doctor::from).collect();
        let meta = envelope.meta.unwrap_or_default();

        info!("Found {} doctors (page {} of {})", doctors.len(), meta.current_page, meta.last_page);
        Ok(DoctorPage { doctors, meta })
    }

    pub async fn doctors_by_specialization(&self, specialization_uuid: Uuid) -> Result<Vec<Doctor>, AppError> {
        let page = self
            .search_doctors(&DoctorSearchFilters::by_specialization(specialization_uuid))
            .await?;
        Ok(page.doctors)
    }

    /// `GET /doctors/{uuid}`
    pub async fn get_doctor(&self, doctor_id: Uuid) -> Result<Doctor, AppError> {
        debug!("Fetching doctor profile: {}", doctor_id);

        let path = format!("/doctors/{}", doctor_id);
        let record: DoctorRecord = self.api.get(&path, &[], None).await?;

        Ok(Doctor::from(record))
    }
}
