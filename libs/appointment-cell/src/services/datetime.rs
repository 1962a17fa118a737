use chrono::{NaiveDate, NaiveTime};

use shared_models::AppError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// `("2025-04-20", "09:00")` -> `"2025-04-20 09:00:00"`
pub fn format_date_time_for_api(date: &str, time: &str) -> String {
    format!("{} {}:00", date, time)
}

pub fn format_date_for_input(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation("booking.select_date_required".to_string()))
}

pub fn parse_time(time: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map_err(|_| AppError::Validation("booking.select_time_required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date_time_for_api() {
        assert_eq!(format_date_time_for_api("2025-04-20", "09:00"), "2025-04-20 09:00:00");
    }

    #[test]
    fn test_input_date_format() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(format_date_for_input(date), "2025-01-05");
        assert_eq!(parse_date("2025-01-05").unwrap(), date);
    }

    #[test]
    fn test_invalid_values() {
        assert!(parse_date("20.04.2025").is_err());
        assert!(parse_time("9am").is_err());
        assert!(parse_time("09:30").is_ok());
    }
}
