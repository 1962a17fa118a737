pub mod booking_card;
pub mod datetime;
pub mod flow;
pub mod pricing;
pub mod submission;

pub use booking_card::DoctorBookingCard;
pub use datetime::format_date_time_for_api;
pub use flow::BookingFlow;
pub use pricing::PricingService;
pub use submission::AppointmentService;
