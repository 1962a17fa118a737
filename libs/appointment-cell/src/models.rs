// libs/appointment-cell/src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use shared_models::AppError;

// ==============================================================================
// SELECTION MODELS
// ==============================================================================

/// Which catalog the booking targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceSelection {
    Doctor,
    Analysis,
    Checkup,
}

impl ServiceSelection {
    /// `bookable_type` sent to `POST /appointments`.
    pub fn bookable_type(&self) -> &'static str {
        match self {
            ServiceSelection::Doctor => "doctor",
            ServiceSelection::Analysis => "medical_test",
            ServiceSelection::Checkup => "checkup",
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            ServiceSelection::Doctor => "booking.services.doctor",
            ServiceSelection::Analysis => "booking.services.analysis",
            ServiceSelection::Checkup => "booking.services.checkup",
        }
    }
}

impl fmt::Display for ServiceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceSelection::Doctor => write!(f, "doctor"),
            ServiceSelection::Analysis => write!(f, "analysis"),
            ServiceSelection::Checkup => write!(f, "checkup"),
        }
    }
}

impl FromStr for ServiceSelection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(ServiceSelection::Doctor),
            "analysis" => Ok(ServiceSelection::Analysis),
            "checkup" => Ok(ServiceSelection::Checkup),
            other => Err(AppError::Validation(format!("Unknown service: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentKind {
    #[default]
    Primary,
    Secondary,
}

impl AppointmentKind {
    pub fn label_key(&self) -> &'static str {
        match self {
            AppointmentKind::Primary => "booking.appointment_kind.primary",
            AppointmentKind::Secondary => "booking.appointment_kind.secondary",
        }
    }
}

impl FromStr for AppointmentKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(AppointmentKind::Primary),
            "secondary" => Ok(AppointmentKind::Secondary),
            other => Err(AppError::Validation(format!("Unknown appointment kind: {}", other))),
        }
    }
}

/// Emitted by a doctor card once a date and time are picked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSlotSelection {
    pub doctor_id: Uuid,
    pub name: String,
    /// `yyyy-mm-dd`
    pub date: String,
    /// `HH:MM`
    pub time: String,
}

/// Unsaved selection held by the booking page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service: Option<ServiceSelection>,
    pub specialty: Option<String>,
    /// Backend UUID of the doctor, analysis or checkup once known.
    pub target_uuid: Option<Uuid>,
    /// Analysis/checkup name, resolved to a UUID at submission.
    pub target_name: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub appointment_kind: Option<AppointmentKind>,
}

// ==============================================================================
// WIRE MODELS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentPayload {
    pub bookable_type: String,
    pub uuid: Uuid,
    /// `yyyy-mm-dd HH:MM:00`
    pub start_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub uuid: Uuid,
    #[serde(default)]
    pub number: Option<String>,
    pub bookable_type: String,
    pub start_at: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl AppointmentRecord {
    /// Backend booking number, or a short form of the UUID when absent.
    pub fn booking_number(&self) -> String {
        match &self.number {
            Some(number) if !number.trim().is_empty() => number.clone(),
            _ => self.uuid.simple().to_string()[..8].to_uppercase(),
        }
    }
}

// ==============================================================================
// OUTCOMES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub booking_number: String,
    pub cost: u64,
    pub service_label: String,
    pub start_at: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Confirmed(BookingConfirmation),
    /// Credentials missing or rejected; the navigator was sent to login.
    Redirected,
    /// Local validation or a "not found" domain error; localized message.
    Rejected(String),
    /// Network/server failure; localized message, user may retry.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingView {
    Selecting,
    Confirmation(BookingConfirmation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bookable_types() {
        assert_eq!(ServiceSelection::Doctor.bookable_type(), "doctor");
        assert_eq!(ServiceSelection::Analysis.bookable_type(), "medical_test");
        assert_eq!("Checkup".parse::<ServiceSelection>().unwrap(), ServiceSelection::Checkup);
        assert!("surgery".parse::<ServiceSelection>().is_err());
    }

    #[test]
    fn test_booking_number_fallback() {
        let uuid = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").unwrap();
        let mut record = AppointmentRecord {
            uuid,
            number: Some("A-1042".to_string()),
            bookable_type: "doctor".to_string(),
            start_at: "2025-04-20 09:00:00".to_string(),
            status: None,
        };
        assert_eq!(record.booking_number(), "A-1042");

        record.number = None;
        assert_eq!(record.booking_number(), "A1B2C3D4");
    }
}
