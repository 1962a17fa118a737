use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Uz,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::Uz, Locale::En];

    /// Code sent in the `X-Language` header.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Uz => "uz",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ru" => Ok(Locale::Ru),
            "uz" => Ok(Locale::Uz),
            "en" => Ok(Locale::En),
            other => Err(AppError::Validation(format!("Unsupported locale: {}", other))),
        }
    }
}
