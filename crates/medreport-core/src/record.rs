//! Patient intake record.
//!
//! [`PatientRecord`] is both the draft the form edits and the value handed to storage. It
//! keeps every field exactly as typed; [`ValidatedRecord`] is the frozen form produced by
//! [`crate::validation::validate_record`].
//!
//! ## Wire format
//!
//! ```json
//! {
//!   "subjectId": "1001",
//!   "patientId": "P-42",
//!   "patientName": "Ada Lovelace",
//!   "age": "36",
//!   "gender": "female",
//!   "admitDate": "2024-01-01",
//!   "dischargeDate": "2024-01-04",
//!   "dischargeLocation": "home"
//! }
//! ```

use crate::constants::ISO_DATE_FORMAT;
use crate::error::{IntakeError, IntakeResult};
use chrono::{DateTime, NaiveDate};
use medreport_types::{Age, NonEmptyText};
use serde::{Deserialize, Serialize};

/// The eight fields of the intake form, in form order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SubjectId,
    PatientId,
    PatientName,
    Age,
    Gender,
    AdmitDate,
    DischargeDate,
    DischargeLocation,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 8] = [
        Field::SubjectId,
        Field::PatientId,
        Field::PatientName,
        Field::Age,
        Field::Gender,
        Field::AdmitDate,
        Field::DischargeDate,
        Field::DischargeLocation,
    ];

    /// Name of the field in the stored JSON.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::SubjectId => "subjectId",
            Field::PatientId => "patientId",
            Field::PatientName => "patientName",
            Field::Age => "age",
            Field::Gender => "gender",
            Field::AdmitDate => "admitDate",
            Field::DischargeDate => "dischargeDate",
            Field::DischargeLocation => "dischargeLocation",
        }
    }

    /// Human label used at the start of validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Field::SubjectId => "Subject ID",
            Field::PatientId => "Patient ID",
            Field::PatientName => "Patient name",
            Field::Age => "Age",
            Field::Gender => "Gender",
            Field::AdmitDate => "Admit date",
            Field::DischargeDate => "Discharge date",
            Field::DischargeLocation => "Discharge location",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::AdmitDate | Field::DischargeDate)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A draft or submitted patient record, exactly as entered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(default)]
    pub subject_id: String,
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default, with = "iso_date")]
    pub admit_date: Option<NaiveDate>,
    #[serde(default, with = "iso_date")]
    pub discharge_date: Option<NaiveDate>,
    #[serde(default)]
    pub discharge_location: String,
}

/// A single edit to one field of a draft record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    SubjectId(String),
    PatientId(String),
    PatientName(String),
    Age(String),
    Gender(String),
    AdmitDate(Option<NaiveDate>),
    DischargeDate(Option<NaiveDate>),
    DischargeLocation(String),
}

impl FieldUpdate {
    /// The field this update writes.
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::SubjectId(_) => Field::SubjectId,
            FieldUpdate::PatientId(_) => Field::PatientId,
            FieldUpdate::PatientName(_) => Field::PatientName,
            FieldUpdate::Age(_) => Field::Age,
            FieldUpdate::Gender(_) => Field::Gender,
            FieldUpdate::AdmitDate(_) => Field::AdmitDate,
            FieldUpdate::DischargeDate(_) => Field::DischargeDate,
            FieldUpdate::DischargeLocation(_) => Field::DischargeLocation,
        }
    }
}

impl PatientRecord {
    /// Creates the empty record a freshly opened form starts with.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single field, leaving the others untouched.
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::SubjectId(v) => self.subject_id = v,
            FieldUpdate::PatientId(v) => self.patient_id = v,
            FieldUpdate::PatientName(v) => self.patient_name = v,
            FieldUpdate::Age(v) => self.age = v,
            FieldUpdate::Gender(v) => self.gender = v,
            FieldUpdate::AdmitDate(v) => self.admit_date = v,
            FieldUpdate::DischargeDate(v) => self.discharge_date = v,
            FieldUpdate::DischargeLocation(v) => self.discharge_location = v,
        }
    }

    /// Returns the text of a text field, or `None` for the two date fields.
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::SubjectId => Some(&self.subject_id),
            Field::PatientId => Some(&self.patient_id),
            Field::PatientName => Some(&self.patient_name),
            Field::Age => Some(&self.age),
            Field::Gender => Some(&self.gender),
            Field::DischargeLocation => Some(&self.discharge_location),
            Field::AdmitDate | Field::DischargeDate => None,
        }
    }

    /// Whether a field holds a value. Only the empty string counts as empty; whitespace
    /// is a value.
    pub fn is_present(&self, field: Field) -> bool {
        match field {
            Field::AdmitDate => self.admit_date.is_some(),
            Field::DischargeDate => self.discharge_date.is_some(),
            _ => self.text(field).is_some_and(|v| !v.is_empty()),
        }
    }

    /// Serialises the record to the JSON stored under the hand-off key.
    pub fn to_json(&self) -> IntakeResult<String> {
        serde_json::to_string_pretty(self).map_err(IntakeError::Serialization)
    }

    /// Parses a record previously written by [`PatientRecord::to_json`].
    pub fn from_json(raw: &str) -> IntakeResult<Self> {
        serde_json::from_str(raw).map_err(IntakeError::Deserialization)
    }
}

/// A record that passed validation; every field is present and well-formed.
///
/// Text fields keep the stored text verbatim. `age` is the text as entered and
/// `age_years` its parsed value.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedRecord {
    pub subject_id: NonEmptyText,
    pub patient_id: NonEmptyText,
    pub patient_name: NonEmptyText,
    pub age: NonEmptyText,
    pub age_years: Age,
    pub gender: NonEmptyText,
    pub admit_date: NaiveDate,
    pub discharge_date: NaiveDate,
    pub discharge_location: NonEmptyText,
}

/// Parses a submitted or stored date.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 instant such as `2024-01-01T00:00:00.000Z`, keeping
/// the calendar date in the instant's own offset. Blank input is `None`.
///
/// # Errors
///
/// Returns `IntakeError::InvalidInput` for anything else.
pub fn parse_date(raw: &str) -> IntakeResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(raw)
        .map(|instant| Some(instant.date_naive()))
        .map_err(|_| IntakeError::InvalidInput(format!("invalid date: {raw}")))
}

/// Serde adapter for optional ISO dates: writes `YYYY-MM-DD`, reads via [`parse_date`].
/// `null` and a missing key read as `None`.
mod iso_date {
    use crate::constants::ISO_DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(ISO_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => super::parse_date(&raw).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filled_record() -> PatientRecord {
        PatientRecord {
            subject_id: "1001".into(),
            patient_id: "P-42".into(),
            patient_name: "Ada Lovelace".into(),
            age: "36".into(),
            gender: "female".into(),
            admit_date: Some(date(2024, 1, 1)),
            discharge_date: Some(date(2024, 1, 4)),
            discharge_location: "nursing-home".into(),
        }
    }

    #[test]
    fn test_new_record_is_empty() {
        let record = PatientRecord::new();
        for field in Field::ALL {
            assert!(!record.is_present(field), "{field} should be empty");
        }
    }

    #[test]
    fn test_apply_writes_only_target_field() {
        let mut record = PatientRecord::new();
        record.apply(FieldUpdate::PatientName("Grace".into()));
        record.apply(FieldUpdate::AdmitDate(Some(date(2024, 3, 1))));

        assert_eq!(record.patient_name, "Grace");
        assert_eq!(record.admit_date, Some(date(2024, 3, 1)));
        assert!(record.subject_id.is_empty());
        assert_eq!(record.discharge_date, None);
    }

    #[test]
    fn test_field_update_reports_its_field() {
        assert_eq!(FieldUpdate::Age("5".into()).field(), Field::Age);
        assert_eq!(
            FieldUpdate::DischargeDate(None).field(),
            Field::DischargeDate
        );
    }

    #[test]
    fn test_whitespace_only_text_is_present() {
        let mut record = PatientRecord::new();
        record.apply(FieldUpdate::Gender("   ".into()));
        assert!(record.is_present(Field::Gender));

        record.apply(FieldUpdate::Gender(String::new()));
        assert!(!record.is_present(Field::Gender));
    }

    #[test]
    fn test_json_uses_camel_case_and_iso_dates() {
        let json = filled_record().to_json().expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["patientId"], "P-42");
        assert_eq!(value["dischargeLocation"], "nursing-home");
        assert_eq!(value["admitDate"], "2024-01-01");
        assert_eq!(value["dischargeDate"], "2024-01-04");
    }

    #[test]
    fn test_json_round_trip_preserves_fields() {
        let record = filled_record();
        let json = record.to_json().expect("serialize");
        let restored = PatientRecord::from_json(&json).expect("deserialize");
        assert_eq!(restored, record);
    }

    #[test]
    fn test_reads_browser_style_instants() {
        let raw = r#"{
            "subjectId": "1",
            "patientId": "2",
            "patientName": "N",
            "age": "40",
            "gender": "male",
            "admitDate": "2024-01-01T00:00:00.000Z",
            "dischargeDate": "2024-01-04T00:00:00.000Z",
            "dischargeLocation": "home"
        }"#;
        let record = PatientRecord::from_json(raw).expect("deserialize");
        assert_eq!(record.admit_date, Some(date(2024, 1, 1)));
        assert_eq!(record.discharge_date, Some(date(2024, 1, 4)));
    }

    #[test]
    fn test_missing_and_null_dates_read_as_none() {
        let record =
            PatientRecord::from_json(r#"{"patientId": "2", "admitDate": null}"#).expect("parse");
        assert_eq!(record.patient_id, "2");
        assert_eq!(record.admit_date, None);
        assert_eq!(record.discharge_date, None);
        assert!(record.subject_id.is_empty());
    }

    #[test]
    fn test_parse_date_accepts_both_formats() {
        assert_eq!(parse_date("2024-02-29").unwrap(), Some(date(2024, 2, 29)));
        assert_eq!(
            parse_date("2024-03-01T23:30:00+02:00").unwrap(),
            Some(date(2024, 3, 1))
        );
        assert_eq!(parse_date("  ").unwrap(), None);
        assert!(matches!(
            parse_date("01/03/2024"),
            Err(IntakeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_date() {
        let err = PatientRecord::from_json(r#"{"admitDate": "yesterday"}"#)
            .expect_err("should reject");
        assert!(matches!(err, IntakeError::Deserialization(_)));
    }
}
