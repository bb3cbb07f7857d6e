//! Field catalogue for rendering the intake form.
//!
//! Labels, placeholders, help text and the fixed option lists for the two select fields.
//! The option lists describe what the form offers; the validator only checks presence.

use crate::record::Field;
use serde::Serialize;

/// Gender options offered by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn value(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// Discharge destinations offered by the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DischargeLocation {
    Home,
    NursingHome,
    Rehabilitation,
    AnotherHospital,
    Deceased,
}

impl DischargeLocation {
    pub const ALL: [DischargeLocation; 5] = [
        DischargeLocation::Home,
        DischargeLocation::NursingHome,
        DischargeLocation::Rehabilitation,
        DischargeLocation::AnotherHospital,
        DischargeLocation::Deceased,
    ];

    pub fn value(self) -> &'static str {
        match self {
            DischargeLocation::Home => "home",
            DischargeLocation::NursingHome => "nursing-home",
            DischargeLocation::Rehabilitation => "rehabilitation",
            DischargeLocation::AnotherHospital => "another-hospital",
            DischargeLocation::Deceased => "deceased",
        }
    }

    /// Label in the form's select. Differs from the report label for `rehabilitation`.
    pub fn label(self) -> &'static str {
        match self {
            DischargeLocation::Home => "Home",
            DischargeLocation::NursingHome => "Nursing Home",
            DischargeLocation::Rehabilitation => "Rehabilitation Center",
            DischargeLocation::AnotherHospital => "Another Hospital",
            DischargeLocation::Deceased => "Deceased",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// How a field is entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
    Date,
    Select,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub kind: InputKind,
    pub placeholder: &'static str,
    pub help: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
}

/// Describes one field of the form.
pub fn field_spec(field: Field) -> FieldSpec {
    let (label, kind, placeholder, help) = match field {
        Field::SubjectId => (
            "Subject ID",
            InputKind::Text,
            "Enter subject ID",
            "Unique identifier for the patient",
        ),
        Field::PatientId => (
            "Patient ID",
            InputKind::Text,
            "Enter patient ID",
            "Unique identifier for the patient",
        ),
        Field::PatientName => (
            "Patient Name",
            InputKind::Text,
            "Enter patient name",
            "Full name of the patient for identification",
        ),
        Field::Age => (
            "Age (years)",
            InputKind::Number,
            "Enter patient age",
            "Age is a significant risk factor for cardiovascular disease",
        ),
        Field::Gender => (
            "Gender",
            InputKind::Select,
            "Select gender",
            "Gender affects cardiovascular risk patterns",
        ),
        Field::AdmitDate => (
            "Admit Date",
            InputKind::Date,
            "Pick a date",
            "Enter the date of hospital admission",
        ),
        Field::DischargeDate => (
            "Discharge Date",
            InputKind::Date,
            "Pick a date",
            "Enter the date of hospital discharge",
        ),
        Field::DischargeLocation => (
            "Discharge Location",
            InputKind::Select,
            "Select the relevant discharge location",
            "Where the patient went after leaving hospital",
        ),
    };

    let options = match field {
        Field::Gender => Gender::ALL
            .iter()
            .map(|g| FieldOption {
                value: g.value(),
                label: g.label(),
            })
            .collect(),
        Field::DischargeLocation => DischargeLocation::ALL
            .iter()
            .map(|l| FieldOption {
                value: l.value(),
                label: l.label(),
            })
            .collect(),
        _ => Vec::new(),
    };

    FieldSpec {
        field,
        label,
        kind,
        placeholder,
        help,
        options,
    }
}

/// The whole form, in field order.
pub fn form_fields() -> Vec<FieldSpec> {
    Field::ALL.into_iter().map(field_spec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_cover_every_field_in_order() {
        let fields: Vec<Field> = form_fields().into_iter().map(|s| s.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_only_selects_carry_options() {
        for spec in form_fields() {
            assert_eq!(
                !spec.options.is_empty(),
                spec.kind == InputKind::Select,
                "{}",
                spec.field
            );
        }
    }

    #[test]
    fn test_discharge_options_match_stored_values() {
        let spec = field_spec(Field::DischargeLocation);
        let values: Vec<&str> = spec.options.iter().map(|o| o.value).collect();
        assert_eq!(
            values,
            ["home", "nursing-home", "rehabilitation", "another-hospital", "deceased"]
        );
    }

    #[test]
    fn test_spec_serializes_wire_field_name() {
        let json = serde_json::to_value(field_spec(Field::Gender)).unwrap();
        assert_eq!(json["field"], "gender");
        assert_eq!(json["kind"], "select");
        assert_eq!(json["options"][1]["label"], "Female");
    }
}
