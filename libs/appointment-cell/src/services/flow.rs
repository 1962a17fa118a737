// =====================================================================================
// BOOKING FLOW - SERVICE -> SPECIALTY -> DOCTOR/DATE/TIME -> SUBMIT
// =====================================================================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use doctor_cell::{Doctor, DoctorService, SpecialtyDirectory, DEFAULT_TIME_SLOTS};
use shared_models::{AppError, Locale};
use shared_utils::Translator;

use crate::models::{
    AppointmentKind, BookingDraft, BookingView, DoctorSlotSelection, ServiceSelection, SubmissionOutcome,
};
use crate::services::booking_card::DoctorBookingCard;
use crate::services::datetime::{format_date_for_input, parse_date};
use crate::services::submission::AppointmentService;

pub struct BookingFlow {
    doctors: DoctorService,
    appointments: Arc<AppointmentService>,
    translator: Arc<Translator>,
    directory: SpecialtyDirectory,
    today: NaiveDate,

    selected_service: Option<ServiceSelection>,
    selected_specialty: Option<String>,
    specialty_uuid: Option<Uuid>,
    selected_date: Option<String>,
    selected_time: Option<String>,
    appointment_kind: AppointmentKind,
    selected_doctor: Option<DoctorSlotSelection>,
    show_doctors: bool,
    doctor_list: Vec<Doctor>,
    loading: bool,
    error: Option<String>,
    view: BookingView,
}

impl BookingFlow {
    pub fn new(
        doctors: DoctorService,
        appointments: Arc<AppointmentService>,
        translator: Arc<Translator>,
        directory: SpecialtyDirectory,
        today: NaiveDate,
    ) -> Self {
        Self {
            doctors,
            appointments,
            translator,
            directory,
            today,
            selected_service: None,
            selected_specialty: None,
            specialty_uuid: None,
            selected_date: None,
            selected_time: None,
            appointment_kind: AppointmentKind::default(),
            selected_doctor: None,
            show_doctors: false,
            doctor_list: Vec::new(),
            loading: false,
            error: None,
            view: BookingView::Selecting,
        }
    }

    fn locale(&self) -> Locale {
        self.appointments.locale()
    }

    pub fn selected_service(&self) -> Option<ServiceSelection> {
        self.selected_service
    }

    pub fn selected_specialty(&self) -> Option<&str> {
        self.selected_specialty.as_deref()
    }

    pub fn selected_date(&self) -> Option<&str> {
        self.selected_date.as_deref()
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn show_doctors(&self) -> bool {
        self.show_doctors
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctor_list
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Localized inline error shown with a retry button.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> &BookingView {
        &self.view
    }

    pub fn time_slots(&self) -> &'static [&'static str] {
        DEFAULT_TIME_SLOTS
    }

    /// Date/time pickers for analyses and checkups appear once one is chosen.
    pub fn shows_date_time_pickers(&self) -> bool {
        matches!(
            self.selected_service,
            Some(ServiceSelection::Analysis) | Some(ServiceSelection::Checkup)
        ) && self.selected_specialty.is_some()
    }

    pub fn booking_card(&self, doctor: &Doctor) -> DoctorBookingCard {
        DoctorBookingCard::new(doctor, self.today)
    }

    /// Resets everything downstream of the service choice.
    pub fn select_service(&mut self, service: ServiceSelection) {
        debug!("Service selected: {}", service);
        self.selected_service = Some(service);
        self.selected_specialty = None;
        self.specialty_uuid = None;
        self.selected_time = None;
        self.selected_doctor = None;
        self.show_doctors = false;
        self.doctor_list.clear();
        self.error = None;
    }

    /// For doctors resolves the specialty UUID and loads the doctor list.
    /// For analyses and checkups only records the choice.
    pub async fn select_specialty(&mut self, specialty: &str) {
        self.selected_specialty = Some(specialty.to_string());
        self.specialty_uuid = None;
        self.selected_doctor = None;
        self.error = None;

        if self.selected_service != Some(ServiceSelection::Doctor) {
            return;
        }

        self.doctor_list.clear();
        self.show_doctors = false;

        match self.resolve_specialty(specialty).await {
            Ok(Some(uuid)) => {
                self.specialty_uuid = Some(uuid);
                self.load_doctors().await;
            }
            Ok(None) => {
                warn!("No specialization matches '{}'", specialty);
                self.error = Some(self.translator.t(
                    self.locale(),
                    "booking.specialty_unknown",
                    &[("specialty", specialty)],
                ));
            }
            Err(e) => {
                error!("Failed to load specializations: {}", e);
                self.error = Some(self.translator.t(self.locale(), e.message_key(), &[]));
            }
        }
    }

    async fn resolve_specialty(&mut self, specialty: &str) -> Result<Option<Uuid>, AppError> {
        if let Some(uuid) = self.directory.resolve(specialty) {
            return Ok(Some(uuid));
        }
        if self.directory.has_dynamic_entries() {
            return Ok(None);
        }

        self.loading = true;
        let result = self.doctors.list_specializations().await;
        self.loading = false;

        self.directory.refresh(&result?);
        Ok(self.directory.resolve(specialty))
    }

    async fn load_doctors(&mut self) {
        let Some(uuid) = self.specialty_uuid else {
            return;
        };

        self.loading = true;
        self.error = None;
        let result = self.doctors.doctors_by_specialization(uuid).await;
        self.loading = false;

        match result {
            Ok(doctors) => {
                info!("Loaded {} doctors for specialization {}", doctors.len(), uuid);
                self.doctor_list = doctors;
                self.show_doctors = true;
            }
            Err(e) => {
                error!("Failed to load doctors: {}", e);
                self.doctor_list.clear();
                self.show_doctors = false;
                self.error = Some(self.translator.t(self.locale(), "booking.doctors_load_failed", &[]));
            }
        }
    }

    /// Manual "try again": repeats whatever fetch failed last.
    pub async fn retry(&mut self) {
        if self.specialty_uuid.is_some() {
            self.load_doctors().await;
        } else if let Some(specialty) = self.selected_specialty.clone() {
            self.select_specialty(&specialty).await;
        }
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        if date < self.today {
            return Err(AppError::Validation("booking.date_in_past".to_string()));
        }
        self.selected_date = Some(format_date_for_input(date));
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), AppError> {
        if !DEFAULT_TIME_SLOTS.contains(&time) {
            return Err(AppError::Validation("booking.select_time_required".to_string()));
        }
        self.selected_time = Some(time.to_string());
        Ok(())
    }

    pub fn select_appointment_kind(&mut self, kind: AppointmentKind) {
        self.appointment_kind = kind;
    }

    /// Callback from a doctor card.
    pub fn choose_doctor_slot(&mut self, selection: DoctorSlotSelection) -> Result<(), AppError> {
        parse_date(&selection.date)?;
        debug!("Doctor {} chosen for {} {}", selection.name, selection.date, selection.time);
        self.selected_date = Some(selection.date.clone());
        self.selected_time = Some(selection.time.clone());
        self.selected_doctor = Some(selection);
        Ok(())
    }

    pub fn draft(&self) -> BookingDraft {
        let is_doctor = self.selected_service == Some(ServiceSelection::Doctor);

        BookingDraft {
            service: self.selected_service,
            specialty: self.selected_specialty.clone(),
            target_uuid: if is_doctor {
                self.selected_doctor.as_ref().map(|d| d.doctor_id)
            } else {
                None
            },
            target_name: if is_doctor { None } else { self.selected_specialty.clone() },
            date: self.selected_date.clone(),
            time: self.selected_time.clone(),
            appointment_kind: if is_doctor { Some(self.appointment_kind) } else { None },
        }
    }

    /// Sends the draft; on success switches to the confirmation view.
    pub async fn submit(&mut self) -> SubmissionOutcome {
        self.loading = true;
        let outcome = self.appointments.submit_booking(&self.draft()).await;
        self.loading = false;

        if let SubmissionOutcome::Confirmed(confirmation) = &outcome {
            self.view = BookingView::Confirmation(confirmation.clone());
        }
        outcome
    }

    /// Back to an empty page, as after "book another".
    pub fn reset(&mut self) {
        self.selected_service = None;
        self.selected_specialty = None;
        self.specialty_uuid = None;
        self.selected_date = None;
        self.selected_time = None;
        self.appointment_kind = AppointmentKind::default();
        self.selected_doctor = None;
        self.show_doctors = false;
        self.doctor_list.clear();
        self.loading = false;
        self.error = None;
        self.view = BookingView::Selecting;
    }
}
