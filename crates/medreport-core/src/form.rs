//! Intake form state.
//!
//! [`FormState`] holds the draft record and the errors currently shown next to each field.
//! Edits go through [`FormState::apply`], which clears the edited field's error straight
//! away; the full validator only runs on [`FormState::submit`].

use crate::error::IntakeResult;
use crate::navigation::Route;
use crate::record::{Field, FieldUpdate, PatientRecord, ValidatedRecord};
use crate::storage::RecordStore;
use crate::validation::{validate_record, ValidationErrors};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Summary message shown after a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NotificationVariant,
}

impl Notification {
    pub fn submitted() -> Self {
        Self {
            title: "Form submitted successfully",
            description: "Redirecting to report page...",
            variant: NotificationVariant::Default,
        }
    }

    pub fn needs_correction() -> Self {
        Self {
            title: "Please correct the errors",
            description: "Fill in all required fields correctly.",
            variant: NotificationVariant::Destructive,
        }
    }
}

/// Result of a submit attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// The record was stored; the caller should move on to `redirect`.
    Accepted {
        record: ValidatedRecord,
        notification: Notification,
        redirect: Route,
    },
    /// Nothing was stored; per-field errors are on the form state.
    Rejected { notification: Notification },
}

impl Submission {
    pub fn notification(&self) -> &Notification {
        match self {
            Submission::Accepted { notification, .. } => notification,
            Submission::Rejected { notification } => notification,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted { .. })
    }
}

/// Draft record plus the per-field errors currently displayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    draft: PatientRecord,
    errors: ValidationErrors,
}

impl FormState {
    /// An empty form with no errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing draft, e.g. one restored from storage.
    pub fn with_draft(draft: PatientRecord) -> Self {
        Self {
            draft,
            errors: ValidationErrors::new(),
        }
    }

    pub fn draft(&self) -> &PatientRecord {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// The message currently shown next to `field`.
    pub fn error_for(&self, field: Field) -> Option<String> {
        self.errors.message(field)
    }

    /// Applies one edit and clears the error shown for that field.
    pub fn apply(&mut self, update: FieldUpdate) {
        let field = update.field();
        self.draft.apply(update);
        self.errors.clear(field);
    }

    /// Validates the draft and, when it passes, writes it to `store` under `key`.
    ///
    /// On rejection the form's errors are replaced with the new validation result and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Only storage failures are returned as errors; validation failures are reported
    /// through [`Submission::Rejected`].
    pub fn submit(&mut self, store: &dyn RecordStore, key: &str) -> IntakeResult<Submission> {
        match validate_record(&self.draft) {
            Ok(record) => {
                store.put(key, &self.draft)?;
                self.errors = ValidationErrors::new();
                tracing::info!("accepted intake form for patient {}", record.patient_id);
                Ok(Submission::Accepted {
                    record,
                    notification: Notification::submitted(),
                    redirect: Route::Report,
                })
            }
            Err(errors) => {
                tracing::info!("rejected intake form: {}", errors);
                self.errors = errors;
                Ok(Submission::Rejected {
                    notification: Notification::needs_correction(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PATIENT_DATA_KEY;
    use crate::storage::MemoryStore;
    use crate::validation::FieldError;
    use chrono::NaiveDate;

    fn fill(form: &mut FormState) {
        form.apply(FieldUpdate::SubjectId("1001".into()));
        form.apply(FieldUpdate::PatientId("P-42".into()));
        form.apply(FieldUpdate::PatientName("Ada Lovelace".into()));
        form.apply(FieldUpdate::Age("36".into()));
        form.apply(FieldUpdate::Gender("female".into()));
        form.apply(FieldUpdate::AdmitDate(NaiveDate::from_ymd_opt(2024, 1, 1)));
        form.apply(FieldUpdate::DischargeDate(NaiveDate::from_ymd_opt(2024, 1, 4)));
        form.apply(FieldUpdate::DischargeLocation("home".into()));
    }

    #[test]
    fn test_new_form_is_empty_without_errors() {
        let form = FormState::new();
        assert_eq!(form.draft(), &PatientRecord::new());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_empty_submit_is_rejected_and_stores_nothing() {
        let store = MemoryStore::new();
        let mut form = FormState::new();

        let outcome = form.submit(&store, PATIENT_DATA_KEY).unwrap();

        assert_eq!(
            outcome,
            Submission::Rejected {
                notification: Notification::needs_correction()
            }
        );
        assert_eq!(form.errors().len(), 8);
        assert_eq!(store.get(PATIENT_DATA_KEY).unwrap(), None);
    }

    #[test]
    fn test_editing_field_clears_only_its_error() {
        let store = MemoryStore::new();
        let mut form = FormState::new();
        form.submit(&store, PATIENT_DATA_KEY).unwrap();

        form.apply(FieldUpdate::PatientName("G".into()));

        assert_eq!(form.error_for(Field::PatientName), None);
        assert_eq!(
            form.error_for(Field::PatientId).as_deref(),
            Some("Patient ID is required")
        );
        assert_eq!(form.errors().len(), 7);
    }

    #[test]
    fn test_clearing_does_not_revalidate() {
        let store = MemoryStore::new();
        let mut form = FormState::new();
        fill(&mut form);
        form.apply(FieldUpdate::Age("500".into()));
        form.submit(&store, PATIENT_DATA_KEY).unwrap();
        assert_eq!(form.errors().get(Field::Age), Some(FieldError::InvalidAge));

        // Still invalid, but the error goes away until the next submit.
        form.apply(FieldUpdate::Age("501".into()));
        assert_eq!(form.error_for(Field::Age), None);
    }

    #[test]
    fn test_valid_submit_stores_draft_and_redirects_to_report() {
        let store = MemoryStore::new();
        let mut form = FormState::new();
        fill(&mut form);

        let outcome = form.submit(&store, PATIENT_DATA_KEY).unwrap();

        assert!(outcome.is_accepted());
        assert_eq!(outcome.notification(), &Notification::submitted());
        match &outcome {
            Submission::Accepted {
                record, redirect, ..
            } => {
                assert_eq!(record.patient_id.as_str(), "P-42");
                assert_eq!(*redirect, Route::Report);
            }
            Submission::Rejected { .. } => panic!("expected acceptance"),
        }
        assert_eq!(
            store.get(PATIENT_DATA_KEY).unwrap().as_ref(),
            Some(form.draft())
        );
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_resubmit_after_fixing_errors() {
        let store = MemoryStore::new();
        let mut form = FormState::new();
        fill(&mut form);
        form.apply(FieldUpdate::Gender(String::new()));

        assert!(!form.submit(&store, PATIENT_DATA_KEY).unwrap().is_accepted());
        assert_eq!(
            form.error_for(Field::Gender).as_deref(),
            Some("Gender is required")
        );

        form.apply(FieldUpdate::Gender("other".into()));
        assert!(form.submit(&store, PATIENT_DATA_KEY).unwrap().is_accepted());
    }

    #[test]
    fn test_rejected_notification_is_destructive() {
        let n = Notification::needs_correction();
        assert_eq!(n.variant, NotificationVariant::Destructive);
        assert_eq!(n.description, "Fill in all required fields correctly.");
    }
}
