pub mod client;

pub use client::{ClinicApiClient, Query, LANGUAGE_HEADER};
