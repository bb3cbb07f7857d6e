//! Report derivation.
//!
//! Turns a validated record plus the time the report was generated into the labels shown
//! on the patient report: stay duration, age/stay/discharge categories, display labels and
//! the report identifier. Everything here is pure; calling [`derive`] twice with the same
//! inputs gives the same [`ReportView`].

use crate::constants::{
    ADULT_AGE_YEARS, EXTENDED_STAY_DAYS, GENERATED_ON_FORMAT, MILLIS_PER_DAY,
    MODERATE_STAY_DAYS, REPORT_DATE_FORMAT, REPORT_ID_PREFIX, REPORT_ID_TIMESTAMP_FORMAT,
    SENIOR_AGE_YEARS,
};
use crate::error::{IntakeError, IntakeResult};
use crate::record::{PatientRecord, ValidatedRecord};
use crate::validation::validate_record;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;

/// Age bracket shown in the report summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AgeCategory {
    Pediatric,
    Adult,
    Senior,
}

impl AgeCategory {
    pub fn from_years(years: f64) -> Self {
        if years < ADULT_AGE_YEARS {
            AgeCategory::Pediatric
        } else if years < SENIOR_AGE_YEARS {
            AgeCategory::Adult
        } else {
            AgeCategory::Senior
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Pediatric => "Pediatric",
            AgeCategory::Adult => "Adult",
            AgeCategory::Senior => "Senior",
        }
    }
}

/// Length-of-stay bracket shown in the report summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StayCategory {
    Short,
    Moderate,
    Extended,
}

impl StayCategory {
    pub fn from_days(days: u64) -> Self {
        if days < MODERATE_STAY_DAYS {
            StayCategory::Short
        } else if days < EXTENDED_STAY_DAYS {
            StayCategory::Moderate
        } else {
            StayCategory::Extended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StayCategory::Short => "Short",
            StayCategory::Moderate => "Moderate",
            StayCategory::Extended => "Extended",
        }
    }
}

/// Outcome classification of the discharge location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DischargeStatus {
    /// Discharged home.
    Successful,
    /// Patient died.
    Critical,
    /// Any other destination.
    Transfer,
}

impl DischargeStatus {
    pub fn from_location(location: &str) -> Self {
        match location {
            "home" => DischargeStatus::Successful,
            "deceased" => DischargeStatus::Critical,
            _ => DischargeStatus::Transfer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DischargeStatus::Successful => "Successful",
            DischargeStatus::Critical => "Critical",
            DischargeStatus::Transfer => "Transfer",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(AgeCategory, StayCategory, DischargeStatus);

/// Whole days between two dates, rounded up, ignoring which comes first.
pub fn stay_duration_days(admit_date: NaiveDate, discharge_date: NaiveDate) -> u64 {
    let millis = (discharge_date - admit_date).num_milliseconds().unsigned_abs();
    millis.div_ceil(MILLIS_PER_DAY.unsigned_abs())
}

/// Upper-cases the first character and leaves the rest as stored.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display label for a stored gender value (`female` → `Female`).
pub fn gender_label(gender: &str) -> String {
    capitalize_first(gender)
}

/// Display label for a stored discharge location (`nursing-home` → `Nursing Home`).
pub fn discharge_location_label(location: &str) -> String {
    location
        .split('-')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `RPT-<patientId>-<yyyyMMdd-HHmm>`.
pub fn report_id(patient_id: &str, generated_at: NaiveDateTime) -> String {
    format!(
        "{REPORT_ID_PREFIX}-{patient_id}-{}",
        generated_at.format(REPORT_ID_TIMESTAMP_FORMAT)
    )
}

pub fn stay_duration_label(days: u64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Everything the report page shows: the stored values and the labels derived from them.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub report_id: String,
    pub generated_at: NaiveDateTime,
    pub generated_on_label: String,

    pub subject_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub age: String,
    pub gender: String,
    pub gender_label: String,

    pub admit_date: NaiveDate,
    pub admit_date_label: String,
    pub discharge_date: NaiveDate,
    pub discharge_date_label: String,
    pub stay_duration_days: u64,
    pub stay_duration_label: String,
    pub discharge_location: String,
    pub discharge_location_label: String,

    pub age_category: AgeCategory,
    pub stay_category: StayCategory,
    pub discharge_status: DischargeStatus,
}

/// Derives the report for a validated record.
///
/// `generated_at` is the wall-clock time the report is produced; it only feeds the
/// report identifier and the "generated on" line.
pub fn derive(record: &ValidatedRecord, generated_at: NaiveDateTime) -> ReportView {
    let stay_days = stay_duration_days(record.admit_date, record.discharge_date);
    let location = record.discharge_location.as_str();

    ReportView {
        report_id: report_id(record.patient_id.as_str(), generated_at),
        generated_at,
        generated_on_label: generated_at.format(GENERATED_ON_FORMAT).to_string(),

        subject_id: record.subject_id.to_string(),
        patient_id: record.patient_id.to_string(),
        patient_name: record.patient_name.to_string(),
        age: record.age.to_string(),
        gender: record.gender.to_string(),
        gender_label: gender_label(record.gender.as_str()),

        admit_date: record.admit_date,
        admit_date_label: record.admit_date.format(REPORT_DATE_FORMAT).to_string(),
        discharge_date: record.discharge_date,
        discharge_date_label: record.discharge_date.format(REPORT_DATE_FORMAT).to_string(),
        stay_duration_days: stay_days,
        stay_duration_label: stay_duration_label(stay_days),
        discharge_location: location.to_string(),
        discharge_location_label: discharge_location_label(location),

        age_category: AgeCategory::from_years(record.age_years.years()),
        stay_category: StayCategory::from_days(stay_days),
        discharge_status: DischargeStatus::from_location(location),
    }
}

/// Derives the report for a raw record, refusing records that would not pass validation.
///
/// # Errors
///
/// A single failing field maps to `MissingField` or `InvalidAge`; several map to
/// `Validation` with the full mapping.
pub fn derive_report(record: &PatientRecord, generated_at: NaiveDateTime) -> IntakeResult<ReportView> {
    let frozen = validate_record(record).map_err(|errors| {
        let only = match errors.iter().next() {
            Some((_, error)) if errors.len() == 1 => Some(error),
            _ => None,
        };
        match only {
            Some(error) => IntakeError::from(error),
            None => IntakeError::Validation(errors),
        }
    })?;

    Ok(derive(&frozen, generated_at))
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Patient Report")?;
        writeln!(f, "Generated on {}", self.generated_on_label)?;
        writeln!(f)?;

        writeln!(f, "Patient Information")?;
        writeln!(f, "  Subject ID:         {}", self.subject_id)?;
        writeln!(f, "  Patient ID:         {}", self.patient_id)?;
        writeln!(f, "  Patient Name:       {}", self.patient_name)?;
        writeln!(f, "  Age:                {} years", self.age)?;
        writeln!(f, "  Gender:             {}", self.gender_label)?;
        writeln!(f)?;

        writeln!(f, "Hospital Stay Information")?;
        writeln!(f, "  Admit Date:         {}", self.admit_date_label)?;
        writeln!(f, "  Discharge Date:     {}", self.discharge_date_label)?;
        writeln!(f, "  Length of Stay:     {}", self.stay_duration_label)?;
        writeln!(f, "  Discharge Location: {}", self.discharge_location_label)?;
        writeln!(f)?;

        writeln!(f, "Summary")?;
        writeln!(f, "  Age Category:       {}", self.age_category)?;
        writeln!(f, "  Stay Duration:      {}", self.stay_category)?;
        writeln!(f, "  Discharge Status:   {}", self.discharge_status)?;
        writeln!(f)?;

        writeln!(
            f,
            "This report was automatically generated from the patient information form."
        )?;
        writeln!(f, "Report ID: {}", self.report_id)
    }
}

/// Renders the report as plain text.
pub fn render_text(view: &ReportView) -> String {
    view.to_string()
}
