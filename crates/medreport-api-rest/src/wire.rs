//! JSON request and response bodies for the REST API.
//!
//! These are the documented wire shapes; they convert to and from the core types at the
//! handler boundary so core stays free of HTTP and OpenAPI concerns.

use medreport_core::catalogue::{FieldOption, FieldSpec, InputKind};
use medreport_core::pages::{LandingPage, Link};
use medreport_core::{
    parse_date, IntakeResult, Notification, NotificationVariant, PatientRecord, ReportView,
    ValidationErrors,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    /// Always `ok` while the service is serving requests.
    pub status: String,
}

/// Intake form submission. Every field may be blank; validation reports what is missing.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientRecordReq {
    pub subject_id: String,
    pub patient_id: String,
    pub patient_name: String,
    /// Age in years as typed, e.g. `"42"`.
    pub age: String,
    /// `male`, `female` or `other`.
    pub gender: String,
    /// `YYYY-MM-DD` or an RFC 3339 instant.
    pub admit_date: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 instant.
    pub discharge_date: Option<String>,
    /// `home`, `nursing-home`, `rehabilitation`, `another-hospital` or `deceased`.
    pub discharge_location: String,
}

impl PatientRecordReq {
    /// Converts the body into a draft record.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidInput` if a date is present but unparseable.
    pub fn into_record(self) -> IntakeResult<PatientRecord> {
        let admit_date = match self.admit_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => None,
        };
        let discharge_date = match self.discharge_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => None,
        };

        Ok(PatientRecord {
            subject_id: self.subject_id,
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            age: self.age,
            gender: self.gender,
            admit_date,
            discharge_date,
            discharge_location: self.discharge_location,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NotificationRes {
    pub title: String,
    pub description: String,
    /// `default` or `destructive`.
    pub variant: String,
}

impl From<&Notification> for NotificationRes {
    fn from(n: &Notification) -> Self {
        let variant = match n.variant {
            NotificationVariant::Default => "default",
            NotificationVariant::Destructive => "destructive",
        };
        Self {
            title: n.title.to_string(),
            description: n.description.to_string(),
            variant: variant.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitRes {
    pub notification: NotificationRes,
    /// Path of the view to go to next.
    pub redirect: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RejectedRes {
    pub notification: NotificationRes,
    /// Message per failing field, keyed by the field's JSON name.
    pub errors: BTreeMap<String, String>,
}

impl RejectedRes {
    pub fn new(notification: &Notification, errors: &ValidationErrors) -> Self {
        Self {
            notification: notification.into(),
            errors: errors
                .messages()
                .into_iter()
                .map(|(field, message)| (field.to_string(), message))
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportRes {
    pub report_id: String,
    /// `YYYY-MM-DDTHH:MM:SS`, local wall-clock time.
    pub generated_at: String,
    pub generated_on_label: String,
    pub subject_id: String,
    pub patient_id: String,
    pub patient_name: String,
    pub age: String,
    pub gender: String,
    pub gender_label: String,
    pub admit_date: String,
    pub admit_date_label: String,
    pub discharge_date: String,
    pub discharge_date_label: String,
    pub stay_duration_days: u64,
    pub stay_duration_label: String,
    pub discharge_location: String,
    pub discharge_location_label: String,
    /// `Pediatric`, `Adult` or `Senior`.
    pub age_category: String,
    /// `Short`, `Moderate` or `Extended`.
    pub stay_category: String,
    /// `Successful`, `Critical` or `Transfer`.
    pub discharge_status: String,
    /// Path of the view the report links back to.
    pub back: String,
}

impl From<ReportView> for ReportRes {
    fn from(v: ReportView) -> Self {
        Self {
            report_id: v.report_id,
            generated_at: v.generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            generated_on_label: v.generated_on_label,
            subject_id: v.subject_id,
            patient_id: v.patient_id,
            patient_name: v.patient_name,
            age: v.age,
            gender: v.gender,
            gender_label: v.gender_label,
            admit_date: v.admit_date.to_string(),
            admit_date_label: v.admit_date_label,
            discharge_date: v.discharge_date.to_string(),
            discharge_date_label: v.discharge_date_label,
            stay_duration_days: v.stay_duration_days,
            stay_duration_label: v.stay_duration_label,
            discharge_location: v.discharge_location,
            discharge_location_label: v.discharge_location_label,
            age_category: v.age_category.to_string(),
            stay_category: v.stay_category.to_string(),
            discharge_status: v.discharge_status.to_string(),
            back: medreport_core::Route::Form.path().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LinkRes {
    pub label: String,
    pub href: String,
}

impl From<&Link> for LinkRes {
    fn from(link: &Link) -> Self {
        Self {
            label: link.label.to_string(),
            href: link.route.path().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LandingRes {
    pub title: String,
    pub tagline: String,
    pub headline: String,
    pub description: String,
    pub links: Vec<LinkRes>,
}

impl From<LandingPage> for LandingRes {
    fn from(page: LandingPage) -> Self {
        Self {
            title: page.title.to_string(),
            tagline: page.tagline.to_string(),
            headline: page.headline.to_string(),
            description: page.description.to_string(),
            links: page.links.iter().map(LinkRes::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldOptionRes {
    pub value: String,
    pub label: String,
}

impl From<&FieldOption> for FieldOptionRes {
    fn from(o: &FieldOption) -> Self {
        Self {
            value: o.value.to_string(),
            label: o.label.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FieldSpecRes {
    /// JSON name of the field in `PatientRecordReq`.
    pub field: String,
    pub label: String,
    /// `text`, `number`, `date` or `select`.
    pub kind: String,
    pub placeholder: String,
    pub help: String,
    pub options: Vec<FieldOptionRes>,
}

impl From<&FieldSpec> for FieldSpecRes {
    fn from(spec: &FieldSpec) -> Self {
        let kind = match spec.kind {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Date => "date",
            InputKind::Select => "select",
        };
        Self {
            field: spec.field.wire_name().to_string(),
            label: spec.label.to_string(),
            kind: kind.to_string(),
            placeholder: spec.placeholder.to_string(),
            help: spec.help.to_string(),
            options: spec.options.iter().map(FieldOptionRes::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FormFieldsRes {
    pub fields: Vec<FieldSpecRes>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use medreport_core::IntakeError;

    #[test]
    fn test_into_record_parses_dates() {
        let req = PatientRecordReq {
            patient_id: "P-1".into(),
            admit_date: Some("2024-01-01".into()),
            discharge_date: Some("2024-01-04T00:00:00.000Z".into()),
            ..Default::default()
        };
        let record = req.into_record().unwrap();
        assert_eq!(record.patient_id, "P-1");
        assert_eq!(record.admit_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(record.discharge_date, NaiveDate::from_ymd_opt(2024, 1, 4));
    }

    #[test]
    fn test_into_record_treats_blank_date_as_missing() {
        let req = PatientRecordReq {
            admit_date: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(req.into_record().unwrap().admit_date, None);
    }

    #[test]
    fn test_into_record_rejects_bad_date() {
        let req = PatientRecordReq {
            discharge_date: Some("next week".into()),
            ..Default::default()
        };
        assert!(matches!(
            req.into_record(),
            Err(IntakeError::InvalidInput(_))
        ));
    }
}
