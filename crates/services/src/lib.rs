#![forbid(unsafe_code)]

pub mod app_services;
pub mod bank_loader;
pub mod error;
pub mod randomizer;
pub mod session_service;

pub use prakriti_core::Clock;

pub use app_services::AppServices;
pub use bank_loader::{load_bank, load_bank_from_bytes};
pub use error::{AppServicesError, BankLoadError, SessionError};
pub use randomizer::Shuffler;
pub use session_service::{AssessmentService, AssessmentSession, SessionStatus, SubmitOutcome};
