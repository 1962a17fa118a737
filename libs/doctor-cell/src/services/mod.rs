pub mod doctor;
pub mod formatting;
pub mod specialty;

pub use doctor::DoctorService;
pub use formatting::{format_languages, DEFAULT_TIME_SLOTS};
pub use specialty::SpecialtyDirectory;
