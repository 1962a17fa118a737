use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use doctor_cell::Doctor;
use shared_models::AppError;

use crate::models::DoctorSlotSelection;
use crate::services::datetime::format_date_for_input;

/// Date and time pickers attached to one doctor in the results list.
#[derive(Debug, Clone)]
pub struct DoctorBookingCard {
    doctor_id: Uuid,
    doctor_name: String,
    min_date: NaiveDate,
    date: NaiveDate,
    time: Option<String>,
    slots: Vec<String>,
}

impl DoctorBookingCard {
    /// Date defaults to, and may not go before, `today`.
    pub fn new(doctor: &Doctor, today: NaiveDate) -> Self {
        Self {
            doctor_id: doctor.id,
            doctor_name: doctor.name.clone(),
            min_date: today,
            date: today,
            time: None,
            slots: doctor.available_times.clone(),
        }
    }

    pub fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }

    pub fn date(&self) -> String {
        format_date_for_input(self.date)
    }

    pub fn time(&self) -> Option<&str> {
        self.time.as_deref()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn set_date(&mut self, date: NaiveDate) -> Result<(), AppError> {
        if date < self.min_date {
            return Err(AppError::Validation("booking.date_in_past".to_string()));
        }
        self.date = date;
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), AppError> {
        if !self.slots.iter().any(|slot| slot == time) {
            return Err(AppError::Validation("booking.select_time_required".to_string()));
        }
        self.time = Some(time.to_string());
        Ok(())
    }

    /// Fails with a blocking validation message when no time is picked.
    pub fn submit(&self) -> Result<DoctorSlotSelection, AppError> {
        let time = self
            .time
            .as_ref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppError::Validation("booking.select_time_required".to_string()))?;

        debug!("Doctor card {} submitted for {} {}", self.doctor_id, self.date(), time);

        Ok(DoctorSlotSelection {
            doctor_id: self.doctor_id,
            name: self.doctor_name.clone(),
            date: self.date(),
            time: time.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use doctor_cell::DEFAULT_TIME_SLOTS;

    fn doctor() -> Doctor {
        Doctor {
            id: Uuid::new_v4(),
            name: "Yusupov Anvar".to_string(),
            specialization: "Кардиология".to_string(),
            experience: Some(15),
            qualification: String::new(),
            category: String::new(),
            languages: vec!["русский".to_string()],
            price: Some(150_000),
            photo_url: None,
            available_times: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 18).unwrap()
    }

    #[test]
    fn test_defaults_to_today() {
        let card = DoctorBookingCard::new(&doctor(), today());
        assert_eq!(card.date(), "2025-04-18");
        assert!(card.time().is_none());
    }

    #[test]
    fn test_submit_without_time_is_rejected() {
        let card = DoctorBookingCard::new(&doctor(), today());
        assert_matches!(card.submit(), Err(AppError::Validation(key)) if key == "booking.select_time_required");
    }

    #[test]
    fn test_past_dates_and_unknown_slots_rejected() {
        let mut card = DoctorBookingCard::new(&doctor(), today());
        assert_matches!(
            card.set_date(NaiveDate::from_ymd_opt(2025, 4, 17).unwrap()),
            Err(AppError::Validation(key)) if key == "booking.date_in_past"
        );
        assert!(card.select_time("13:00").is_err());
        assert_eq!(card.date(), "2025-04-18");
    }

    #[test]
    fn test_submit_emits_selection() {
        let doctor = doctor();
        let mut card = DoctorBookingCard::new(&doctor, today());
        card.set_date(NaiveDate::from_ymd_opt(2025, 4, 20).unwrap()).unwrap();
        card.select_time("09:00").unwrap();

        let selection = card.submit().unwrap();
        assert_eq!(
            selection,
            DoctorSlotSelection {
                doctor_id: doctor.id,
                name: "Yusupov Anvar".to_string(),
                date: "2025-04-20".to_string(),
                time: "09:00".to_string(),
            }
        );
    }
}
