pub mod status_service;

pub use status_service::{exit_code, RunReport, StatusService};
