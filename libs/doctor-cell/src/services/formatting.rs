/// Languages shown when the backend has none on record.
pub const DEFAULT_LANGUAGES: [&str; 2] = ["русский", "узбекский"];

/// Bookable slots offered on every doctor card (lunch 13:00-14:00 excluded).
pub const DEFAULT_TIME_SLOTS: &[&str] = &[
    "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "14:00", "14:30", "15:00", "15:30", "16:00", "16:30", "17:00", "17:30",
];

pub fn format_languages(raw: Option<&str>) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|lang| !lang.is_empty())
        .map(str::to_string)
        .collect();

    if parsed.is_empty() {
        DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
    } else {
        parsed
    }
}

pub fn is_known_slot(time: &str) -> bool {
    DEFAULT_TIME_SLOTS.contains(&time)
}
