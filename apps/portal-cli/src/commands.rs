use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _};
use tracing::{info, warn};
use uuid::Uuid;

use appointment_cell::models::{AppointmentKind, ServiceSelection, SubmissionOutcome};
use appointment_cell::services::datetime::parse_date;
use appointment_cell::{AppointmentService, BookingFlow, PricingService};
use checkup_cell::{CatalogService, RecommendationSelector, SelectorState, SymptomTable};
use doctor_cell::{DoctorService, SpecialtyDirectory};
use shared_config::AppConfig;
use shared_models::{AppError, Locale};
use shared_utils::validation::booking_contact_validator;
use shared_utils::{InMemoryStore, TracingNavigator, Translator};

pub struct Context {
    pub config: AppConfig,
    pub locale: Locale,
    pub translator: Arc<Translator>,
    pub store: Arc<InMemoryStore>,
}

impl Context {
    fn t(&self, key: &str) -> String {
        self.translator.t(self.locale, key, &[])
    }

    /// Validation errors carry a translation key; everything else its generic message.
    fn localized(&self, error: AppError) -> anyhow::Error {
        match error {
            AppError::Validation(key) => anyhow!(self.t(&key)),
            other => anyhow!(self.t(other.message_key())),
        }
    }
}

pub struct BookRequest {
    pub service: ServiceSelection,
    pub target: String,
    pub doctor: Option<Uuid>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub kind: AppointmentKind,
    pub name: String,
    pub phone: String,
    pub consent: bool,
}

pub async fn specializations(ctx: &Context) -> anyhow::Result<()> {
    let service = DoctorService::new(&ctx.config, ctx.locale);
    for specialization in service.list_specializations().await? {
        println!("{}  {}", specialization.uuid, specialization.name);
    }
    Ok(())
}

pub async fn doctors(ctx: &Context, specialty: &str) -> anyhow::Result<()> {
    let service = DoctorService::new(&ctx.config, ctx.locale);

    let mut directory = SpecialtyDirectory::new();
    directory.refresh(&service.list_specializations().await?);
    let uuid = directory.resolve(specialty).ok_or_else(|| {
        anyhow!(ctx
            .translator
            .t(ctx.locale, "booking.specialty_unknown", &[("specialty", specialty)]))
    })?;

    let doctors = service.doctors_by_specialization(uuid).await?;
    if doctors.is_empty() {
        println!("{}", ctx.t("booking.no_doctors"));
        return Ok(());
    }

    for doctor in doctors {
        println!("{}  {}", doctor.id, doctor.name);
        println!("    {} | {}", doctor.specialization, doctor.languages.join(", "));
        if let Some(price) = doctor.price {
            println!("    {} UZS", PricingService::new().format_cost(price));
        }
    }
    Ok(())
}

pub fn symptoms(ctx: &Context) {
    for name in SymptomTable::names(ctx.locale) {
        println!("{}", name);
    }
}

pub async fn recommend(ctx: &Context, symptoms: &[String]) -> anyhow::Result<()> {
    let catalog = CatalogService::new(&ctx.config, ctx.locale);
    let selector = RecommendationSelector::new(&ctx.config, catalog, ctx.translator.clone());

    let mut pending = Vec::new();
    for symptom in symptoms {
        if let Some(handle) = selector.toggle(symptom).await {
            pending.push(handle);
        }
    }
    // Only the last toggle survives the debounce; earlier tasks exit early.
    for handle in pending {
        handle.await.context("recommendation task panicked")?;
    }

    match selector.state().await {
        SelectorState::Idle => println!("{}", selector.prompt()),
        SelectorState::Loading => println!("{}", ctx.t("recommendations.loading")),
        SelectorState::Empty => println!("{}", ctx.t("recommendations.empty")),
        SelectorState::Failed(message) => bail!(message),
        SelectorState::Ready(cards) => {
            let sections = [
                ("recommendations.cards.checkups", &cards.checkups),
                ("recommendations.cards.tests", &cards.tests),
                ("recommendations.cards.related", &cards.related),
                ("recommendations.cards.specialist", &cards.specialist),
            ];
            for (key, card) in sections {
                if card.is_empty() {
                    continue;
                }
                println!("{}: {}", ctx.t(key), card.render(&ctx.translator, ctx.locale));
            }
        }
    }

    selector.unmount();
    Ok(())
}

fn contact_messages(ctx: &Context, request: &BookRequest) -> Vec<String> {
    let values = HashMap::from([
        ("name".to_string(), request.name.clone()),
        ("phone".to_string(), request.phone.clone()),
        ("consent".to_string(), request.consent.to_string()),
    ]);

    let errors = booking_contact_validator().validate(&values);
    errors
        .invalid_fields()
        .into_iter()
        .map(|field| match field {
            "name" => ctx.t("form.name_required"),
            "phone" => ctx.t("form.phone_invalid"),
            _ => ctx.t("form.consent_required"),
        })
        .collect()
}

pub async fn book(ctx: &Context, request: BookRequest) -> anyhow::Result<()> {
    let messages = contact_messages(ctx, &request);
    if !messages.is_empty() {
        bail!(messages.join("\n"));
    }

    let today = chrono::Local::now().date_naive();
    let date = match request.date.as_deref() {
        Some(date) => parse_date(date).map_err(|e| ctx.localized(e))?,
        None => today,
    };

    let appointments = Arc::new(AppointmentService::new(
        &ctx.config,
        ctx.locale,
        ctx.store.clone(),
        Arc::new(TracingNavigator),
        ctx.translator.clone(),
    ));
    let mut flow = BookingFlow::new(
        DoctorService::new(&ctx.config, ctx.locale),
        appointments,
        ctx.translator.clone(),
        SpecialtyDirectory::new(),
        today,
    );

    flow.select_service(request.service);
    flow.select_specialty(&request.target).await;
    if let Some(error) = flow.error() {
        bail!(error.to_string());
    }

    let time = request.time.as_deref().unwrap_or_default();

    if request.service == ServiceSelection::Doctor {
        let doctor = match request.doctor {
            Some(id) => flow.doctors().iter().find(|d| d.id == id),
            None => flow.doctors().first(),
        }
        .cloned()
        .ok_or_else(|| anyhow!(ctx.t("booking.no_doctors")))?;

        let mut card = flow.booking_card(&doctor);
        card.set_date(date).map_err(|e| ctx.localized(e))?;
        if !time.is_empty() {
            card.select_time(time).map_err(|e| ctx.localized(e))?;
        }
        let slot = card.submit().map_err(|e| ctx.localized(e))?;
        flow.choose_doctor_slot(slot).map_err(|e| ctx.localized(e))?;
        flow.select_appointment_kind(request.kind);
    } else {
        flow.select_date(date).map_err(|e| ctx.localized(e))?;
        if !time.is_empty() {
            flow.select_time(time).map_err(|e| ctx.localized(e))?;
        }
    }

    match flow.submit().await {
        SubmissionOutcome::Confirmed(confirmation) => {
            let cost = PricingService::new().format_cost(confirmation.cost);
            println!(
                "{}",
                ctx.translator
                    .t(ctx.locale, "booking.confirmed", &[("number", &confirmation.booking_number)])
            );
            println!("{} | {}", confirmation.service_label, confirmation.start_at);
            println!("{}", ctx.translator.t(ctx.locale, "booking.cost", &[("cost", &cost)]));
            Ok(())
        }
        SubmissionOutcome::Redirected => {
            warn!("Sign-in required; set CLINIC_AUTH_TOKEN");
            bail!(ctx.t("errors.unauthorized"))
        }
        SubmissionOutcome::Rejected(message) | SubmissionOutcome::Failed(message) => bail!(message),
    }
}

pub async fn appointments(ctx: &Context) -> anyhow::Result<()> {
    let service = AppointmentService::new(
        &ctx.config,
        ctx.locale,
        ctx.store.clone(),
        Arc::new(TracingNavigator),
        ctx.translator.clone(),
    );

    let appointments = match service.list_appointments().await {
        Ok(appointments) => appointments,
        Err(e) => bail!(ctx.t(e.message_key())),
    };

    info!("{} appointments", appointments.len());
    for appointment in appointments {
        println!(
            "#{}  {}  {}  {}",
            appointment.booking_number(),
            appointment.bookable_type,
            appointment.start_at,
            appointment.status.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
