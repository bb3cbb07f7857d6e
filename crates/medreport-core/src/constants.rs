//! Constants used throughout the MedReport core crate.
//!
//! Storage names, category thresholds and display formats live here so the validator,
//! the report deriver and the front ends agree on them.

/// Storage key under which the submitted patient record is handed from the form to the report.
pub const PATIENT_DATA_KEY: &str = "patientData";

/// Default directory for the file-backed record store when none is configured.
pub const DEFAULT_DATA_DIR: &str = "medreport_data";

/// File extension used by the file-backed record store.
pub const RECORD_FILE_EXTENSION: &str = "json";

/// Maximum length of a storage key.
pub const MAX_STORAGE_KEY_LEN: usize = 128;

/// Milliseconds in one day, the unit of the stay duration.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Patients younger than this are paediatric.
pub const ADULT_AGE_YEARS: f64 = 18.0;

/// Patients this age or older are seniors.
pub const SENIOR_AGE_YEARS: f64 = 65.0;

/// Stays shorter than this many days are short.
pub const MODERATE_STAY_DAYS: u64 = 3;

/// Stays this many days or longer are extended.
pub const EXTENDED_STAY_DAYS: u64 = 7;

/// Prefix of every report identifier.
pub const REPORT_ID_PREFIX: &str = "RPT";

/// `chrono` format for the timestamp part of a report identifier (`yyyyMMdd-HHmm`).
pub const REPORT_ID_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M";

/// `chrono` format for dates shown on the report (`dd/MM/yyyy`).
pub const REPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// `chrono` format for the "generated on" line of the report.
pub const GENERATED_ON_FORMAT: &str = "%B %d, %Y at %H:%M";

/// Wire format for stored dates.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
