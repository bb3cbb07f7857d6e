//! Page loaders.
//!
//! Each loader gathers what one view needs. The report loader is the read side of the
//! storage hand-off: it redirects to the form instead of rendering a partial report when
//! there is nothing usable to show.

use crate::error::{IntakeError, IntakeResult};
use crate::navigation::Route;
use crate::report::{derive, ReportView};
use crate::storage::RecordStore;
use crate::validation::validate_record;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub route: Route,
}

/// Static content of the landing page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LandingPage {
    pub title: &'static str,
    pub tagline: &'static str,
    pub headline: &'static str,
    pub description: &'static str,
    pub links: Vec<Link>,
}

pub fn landing_page() -> LandingPage {
    LandingPage {
        title: "MedReport",
        tagline: "Patient Information Management System",
        headline: "Streamline Your Medical Reporting",
        description: "Efficiently collect, process, and generate comprehensive patient reports.",
        links: vec![
            Link {
                label: "Start New Report",
                route: Route::Form,
            },
            Link {
                label: "Create Patient Report",
                route: Route::Form,
            },
        ],
    }
}

/// What the report view should do.
#[derive(Clone, Debug, PartialEq)]
pub enum ReportPage {
    Ready(ReportView),
    Redirect(Route),
}

/// Loads the stored record under `key` and derives its report.
///
/// Redirects to the form when no record is stored, or when the stored record would not
/// pass validation (for example because it was edited outside the form).
///
/// # Errors
///
/// Returns storage errors (unreadable or undecodable record) unchanged.
pub fn load_report(
    store: &dyn RecordStore,
    key: &str,
    generated_at: NaiveDateTime,
) -> IntakeResult<ReportPage> {
    let record = match store.get(key)? {
        Some(record) => record,
        None => {
            tracing::info!("{}; redirecting to {}", IntakeError::MissingRecord, Route::Form);
            return Ok(ReportPage::Redirect(Route::Form));
        }
    };

    match validate_record(&record) {
        Ok(frozen) => Ok(ReportPage::Ready(derive(&frozen, generated_at))),
        Err(errors) => {
            tracing::warn!(
                "stored record under {key} is not reportable ({errors}); redirecting to {}",
                Route::Form
            );
            Ok(ReportPage::Redirect(Route::Form))
        }
    }
}

/// Like [`load_report`], but treats a redirect as [`IntakeError::MissingRecord`].
pub fn require_report(
    store: &dyn RecordStore,
    key: &str,
    generated_at: NaiveDateTime,
) -> IntakeResult<ReportView> {
    match load_report(store, key, generated_at)? {
        ReportPage::Ready(view) => Ok(view),
        ReportPage::Redirect(_) => Err(IntakeError::MissingRecord),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PATIENT_DATA_KEY;
    use crate::record::PatientRecord;
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 4)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn stored_record() -> PatientRecord {
        PatientRecord {
            subject_id: "1001".into(),
            patient_id: "P-42".into(),
            patient_name: "Ada Lovelace".into(),
            age: "36".into(),
            gender: "female".into(),
            admit_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            discharge_date: NaiveDate::from_ymd_opt(2024, 1, 4),
            discharge_location: "home".into(),
        }
    }

    #[test]
    fn test_missing_record_redirects_to_form() {
        let store = MemoryStore::new();
        let page = load_report(&store, PATIENT_DATA_KEY, now()).unwrap();
        assert_eq!(page, ReportPage::Redirect(Route::Form));
    }

    #[test]
    fn test_stored_record_renders_report() {
        let store = MemoryStore::new();
        store.put(PATIENT_DATA_KEY, &stored_record()).unwrap();

        match load_report(&store, PATIENT_DATA_KEY, now()).unwrap() {
            ReportPage::Ready(view) => {
                assert_eq!(view.report_id, "RPT-P-42-20240104-0905");
                assert_eq!(view.stay_duration_days, 3);
            }
            ReportPage::Redirect(route) => panic!("unexpected redirect to {route}"),
        }
    }

    #[test]
    fn test_incomplete_stored_record_redirects() {
        let store = MemoryStore::new();
        let mut record = stored_record();
        record.admit_date = None;
        store.put(PATIENT_DATA_KEY, &record).unwrap();

        let page = load_report(&store, PATIENT_DATA_KEY, now()).unwrap();
        assert_eq!(page, ReportPage::Redirect(Route::Form));
    }

    #[test]
    fn test_require_report_maps_redirect_to_missing_record() {
        let store = MemoryStore::new();
        let err = require_report(&store, PATIENT_DATA_KEY, now()).expect_err("should fail");
        assert!(matches!(err, IntakeError::MissingRecord));
    }

    #[test]
    fn test_landing_links_into_form() {
        let page = landing_page();
        assert_eq!(page.title, "MedReport");
        assert!(page.links.iter().all(|l| l.route == Route::Form));
    }
}
