pub mod api;
pub mod auth;
pub mod error;
pub mod locale;

pub use api::{ApiEnvelope, PageMeta};
pub use auth::AuthCredentials;
pub use error::AppError;
pub use locale::Locale;
