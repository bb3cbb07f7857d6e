//! # MedReport Core
//!
//! Core logic for the MedReport patient intake workflow.
//!
//! This crate contains pure data operations and the storage hand-off:
//! - The patient record model and the form validator
//! - Form state with per-field error clearing
//! - Report derivation (stay duration, categories, labels, report identifier)
//! - Key-value record storage (in-memory and file-backed)
//! - Page loaders for the landing, form and report views
//!
//! **No API concerns**: HTTP servers and command-line parsing belong in `medreport-api-rest`
//! and `medreport-cli`.

pub mod catalogue;
pub mod config;
pub mod constants;
pub mod error;
pub mod form;
pub mod navigation;
pub mod pages;
pub mod record;
pub mod report;
pub mod storage;
pub mod validation;

pub use config::CoreConfig;
pub use constants::{DEFAULT_DATA_DIR, PATIENT_DATA_KEY};
pub use error::{IntakeError, IntakeResult};
pub use form::{FormState, Notification, NotificationVariant, Submission};
pub use medreport_types::{Age, AgeError, NonEmptyText, TextError};
pub use navigation::Route;
pub use pages::{landing_page, load_report, require_report, LandingPage, ReportPage};
pub use record::{parse_date, Field, FieldUpdate, PatientRecord, ValidatedRecord};
pub use report::{
    derive, derive_report, render_text, AgeCategory, DischargeStatus, ReportView, StayCategory,
};
pub use storage::{FileStore, MemoryStore, RecordStore};
pub use validation::{validate, validate_record, FieldError, ValidationErrors};
