use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use checkup_cell::CatalogService;
use shared_api::ClinicApiClient;
use shared_config::AppConfig;
use shared_models::{AppError, Locale};
use shared_utils::{read_credentials, CredentialStore, Navigator, Translator};

use crate::models::{
    AppointmentPayload, AppointmentRecord, BookingConfirmation, BookingDraft, ServiceSelection,
    SubmissionOutcome,
};
use crate::services::datetime::{format_date_time_for_api, parse_date, parse_time};
use crate::services::pricing::PricingService;

/// Checks the draft before anything goes over the wire.
///
/// Validation errors carry a translation key.
pub fn validate_draft(draft: &BookingDraft) -> Result<(ServiceSelection, String), AppError> {
    let service = draft
        .service
        .ok_or_else(|| AppError::Validation("errors.validation".to_string()))?;

    let time = draft
        .time
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::Validation("booking.select_time_required".to_string()))?;
    let date = draft
        .date
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::Validation("booking.select_date_required".to_string()))?;

    parse_date(date)?;
    parse_time(time)?;

    Ok((service, format_date_time_for_api(date, time)))
}

/// Payload for `POST /appointments`; requires a resolved target UUID.
pub fn build_payload(draft: &BookingDraft) -> Result<AppointmentPayload, AppError> {
    let (service, start_at) = validate_draft(draft)?;
    let uuid = draft
        .target_uuid
        .ok_or_else(|| AppError::Validation("errors.validation".to_string()))?;

    Ok(AppointmentPayload {
        bookable_type: service.bookable_type().to_string(),
        uuid,
        start_at,
    })
}

pub struct AppointmentService {
    api: ClinicApiClient,
    catalog: CatalogService,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    translator: Arc<Translator>,
    pricing: PricingService,
    login_path: String,
}

impl AppointmentService {
    pub fn new(
        config: &AppConfig,
        locale: Locale,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        translator: Arc<Translator>,
    ) -> Self {
        let api = ClinicApiClient::new(config, locale);
        Self {
            catalog: CatalogService::with_client(api.clone()),
            api,
            store,
            navigator,
            translator,
            pricing: PricingService::new(),
            login_path: config.login_path.clone(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.api.locale()
    }

    /// Target UUID of the draft; analyses and checkups are looked up by name.
    async fn resolve_target(&self, service: ServiceSelection, draft: &BookingDraft) -> Result<Uuid, AppError> {
        if let Some(uuid) = draft.target_uuid {
            return Ok(uuid);
        }

        let name = draft
            .target_name
            .as_deref()
            .ok_or_else(|| AppError::Validation("errors.validation".to_string()))?;

        match service {
            ServiceSelection::Analysis => Ok(self.catalog.find_medical_test(name).await?.uuid),
            ServiceSelection::Checkup => Ok(self.catalog.find_checkup(name).await?.uuid),
            ServiceSelection::Doctor => Err(AppError::Validation("errors.validation".to_string())),
        }
    }

    /// `POST /appointments`. Never sends when the draft is incomplete;
    /// no request at all goes out without credentials.
    pub async fn create_appointment(&self, draft: &BookingDraft) -> Result<AppointmentRecord, AppError> {
        let (service, _) = validate_draft(draft)?;
        let credentials = read_credentials(self.store.as_ref())?;
        let uuid = self.resolve_target(service, draft).await?;

        let mut resolved = draft.clone();
        resolved.target_uuid = Some(uuid);
        let payload = build_payload(&resolved)?;

        debug!("Creating {} appointment for {} at {}", payload.bookable_type, payload.uuid, payload.start_at);

        let body = json!({
            "bookable_type": payload.bookable_type,
            "uuid": payload.uuid,
            "start_at": payload.start_at,
        });
        let record: AppointmentRecord = self.api.post("/appointments", body, Some(&credentials)).await?;

        info!("Appointment {} created ({})", record.uuid, record.booking_number());
        Ok(record)
    }

    /// `GET /appointments` for the signed-in patient.
    pub async fn list_appointments(&self) -> Result<Vec<AppointmentRecord>, AppError> {
        let credentials = read_credentials(self.store.as_ref())?;
        let appointments: Vec<AppointmentRecord> =
            self.api.get("/appointments", &[], Some(&credentials)).await?;
        debug!("Fetched {} appointments", appointments.len());
        Ok(appointments)
    }

    /// Same as [`list_appointments`](Self::list_appointments) but redirects
    /// to login instead of returning `Unauthorized`.
    pub async fn account_appointments(&self) -> Option<Vec<AppointmentRecord>> {
        match self.list_appointments().await {
            Ok(appointments) => Some(appointments),
            Err(e) if e.is_unauthorized() => {
                self.redirect_to_login();
                None
            }
            Err(e) => {
                error!("Failed to load appointments: {}", e);
                None
            }
        }
    }

    /// Submission boundary: every error becomes an outcome, `Unauthorized`
    /// triggers exactly one redirect to the login page.
    pub async fn submit_booking(&self, draft: &BookingDraft) -> SubmissionOutcome {
        let locale = self.locale();

        match self.create_appointment(draft).await {
            Ok(record) => SubmissionOutcome::Confirmed(self.confirmation(draft, &record)),
            Err(AppError::Unauthorized(reason)) => {
                warn!(
                    "{} ({})",
                    self.translator.t(locale, "errors.unauthorized", &[]),
                    reason
                );
                self.redirect_to_login();
                SubmissionOutcome::Redirected
            }
            Err(AppError::Validation(key)) => SubmissionOutcome::Rejected(self.translator.t(locale, &key, &[])),
            Err(e @ AppError::NotFound(_)) => {
                warn!("Booking target missing: {}", e);
                SubmissionOutcome::Rejected(self.translator.t(locale, e.message_key(), &[]))
            }
            Err(e) => {
                error!("Booking failed: {}", e);
                SubmissionOutcome::Failed(self.translator.t(locale, e.message_key(), &[]))
            }
        }
    }

    fn redirect_to_login(&self) {
        self.navigator.redirect(&self.login_path);
    }

    fn confirmation(&self, draft: &BookingDraft, record: &AppointmentRecord) -> BookingConfirmation {
        let locale = self.locale();
        // validated before the request went out
        let service = draft.service.unwrap_or(ServiceSelection::Doctor);

        let mut service_label = self.translator.t(locale, service.label_key(), &[]);
        if service == ServiceSelection::Doctor {
            if let Some(kind) = draft.appointment_kind {
                service_label = format!("{} ({})", service_label, self.translator.t(locale, kind.label_key(), &[]));
            }
        }

        BookingConfirmation {
            booking_number: record.booking_number(),
            cost: self.pricing.price_for(service),
            service_label,
            start_at: record.start_at.clone(),
        }
    }
}
