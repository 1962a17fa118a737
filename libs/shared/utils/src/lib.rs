pub mod i18n;
pub mod navigation;
pub mod storage;
pub mod test_utils;
pub mod validation;

pub use i18n::Translator;
pub use navigation::{Navigator, RecordingNavigator, TracingNavigator};
pub use storage::{read_credentials, CredentialStore, InMemoryStore};
pub use validation::{FieldErrors, FormValidator, Rule};
