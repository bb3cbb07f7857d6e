//! Input validation.
//!
//! [`validate`] is the form validator: it maps each failing field to a message, and a
//! record is acceptable iff the mapping is empty. [`validate_record`] runs the same checks
//! and, on success, freezes the draft into a [`ValidatedRecord`].
//!
//! Every field is required, and only an empty value counts as missing; whitespace is
//! accepted as typed. `age` must additionally parse as a number in `[0, 150]`; when
//! it does not, the age message replaces whatever was recorded for it before. A field
//! carries at most one message.

use crate::constants::MAX_STORAGE_KEY_LEN;
use crate::error::{IntakeError, IntakeResult};
use crate::record::{Field, PatientRecord, ValidatedRecord};
use chrono::NaiveDate;
use medreport_types::{Age, NonEmptyText};
use std::collections::BTreeMap;

/// Why a single field was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(Field),
    #[error("Please enter a valid age")]
    InvalidAge,
}

impl From<FieldError> for IntakeError {
    fn from(err: FieldError) -> Self {
        match err {
            FieldError::Required(field) => IntakeError::MissingField(field),
            FieldError::InvalidAge => IntakeError::InvalidAge,
        }
    }
}

/// Field-to-error mapping produced by the validator, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// The message shown next to `field`, if it has one.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    /// Records an error for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.0.insert(field, error);
    }

    /// Drops the error for `field`. Returns whether there was one.
    pub fn clear(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Messages keyed by the fields' wire names.
    pub fn messages(&self) -> BTreeMap<&'static str, String> {
        self.iter()
            .map(|(field, error)| (field.wire_name(), error.to_string()))
            .collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl serde::Serialize for ValidationErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, error) in self.iter() {
            map.serialize_entry(field.wire_name(), &error.to_string())?;
        }
        map.end()
    }
}

/// Checks a draft record and returns every field that blocks submission.
pub fn validate(record: &PatientRecord) -> ValidationErrors {
    validate_record(record).err().unwrap_or_default()
}

/// Checks a draft record and freezes it when nothing blocks submission.
///
/// # Errors
///
/// Returns the full [`ValidationErrors`] mapping when any field is missing or `age` is
/// not a valid number.
pub fn validate_record(record: &PatientRecord) -> Result<ValidatedRecord, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let subject_id = required_text(&mut errors, Field::SubjectId, &record.subject_id);
    let patient_id = required_text(&mut errors, Field::PatientId, &record.patient_id);
    let patient_name = required_text(&mut errors, Field::PatientName, &record.patient_name);
    let age_text = required_text(&mut errors, Field::Age, &record.age);
    let gender = required_text(&mut errors, Field::Gender, &record.gender);
    let admit_date = required_date(&mut errors, Field::AdmitDate, record.admit_date);
    let discharge_date = required_date(&mut errors, Field::DischargeDate, record.discharge_date);
    let discharge_location = required_text(
        &mut errors,
        Field::DischargeLocation,
        &record.discharge_location,
    );

    let age = age_text.and_then(|raw| match Age::parse(raw.as_str()) {
        Ok(years) => Some((raw, years)),
        Err(e) => {
            tracing::debug!("rejected age {:?}: {}", raw.as_str(), e);
            errors.insert(Field::Age, FieldError::InvalidAge);
            None
        }
    });

    match (
        subject_id,
        patient_id,
        patient_name,
        age,
        gender,
        admit_date,
        discharge_date,
        discharge_location,
    ) {
        (
            Some(subject_id),
            Some(patient_id),
            Some(patient_name),
            Some((age, age_years)),
            Some(gender),
            Some(admit_date),
            Some(discharge_date),
            Some(discharge_location),
        ) if errors.is_empty() => Ok(ValidatedRecord {
            subject_id,
            patient_id,
            patient_name,
            age,
            age_years,
            gender,
            admit_date,
            discharge_date,
            discharge_location,
        }),
        _ => Err(errors),
    }
}

fn required_text(errors: &mut ValidationErrors, field: Field, value: &str) -> Option<NonEmptyText> {
    match NonEmptyText::new(value) {
        Ok(text) => Some(text),
        Err(_) => {
            errors.insert(field, FieldError::Required(field));
            None
        }
    }
}

fn required_date(
    errors: &mut ValidationErrors,
    field: Field,
    value: Option<NaiveDate>,
) -> Option<NaiveDate> {
    if value.is_none() {
        errors.insert(field, FieldError::Required(field));
    }
    value
}

/// Validates that a storage key is safe to use as a file name.
///
/// - Rejects empty or whitespace-only strings
/// - Bounds the length
/// - Restricts characters to ASCII alphanumerics, `.`, `-` and `_`, and rejects keys
///   that start with `.`
///
/// # Errors
///
/// Returns an `IntakeError::InvalidInput` if the key is invalid.
pub fn validate_storage_key(key: &str) -> IntakeResult<()> {
    if key.trim().is_empty() {
        return Err(IntakeError::InvalidInput(
            "storage key cannot be empty".into(),
        ));
    }

    if key.len() > MAX_STORAGE_KEY_LEN {
        return Err(IntakeError::InvalidInput(format!(
            "storage key exceeds maximum length of {} characters",
            MAX_STORAGE_KEY_LEN
        )));
    }

    let ok = key
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(IntakeError::InvalidInput(
            "storage key contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    if key.starts_with('.') {
        return Err(IntakeError::InvalidInput(
            "storage key cannot start with '.'".into(),
        ));
    }

    Ok(())
}
