//! Record hand-off storage.
//!
//! The form writes the accepted record under a key and the report view reads it back.
//! [`RecordStore`] is the narrow interface both sides depend on; [`MemoryStore`] and
//! [`FileStore`] are the two backends.
//!
//! Both backends keep the record as its JSON text, so a read always goes through the same
//! decoding path as a record written by another process.
//!
//! ## File layout
//!
//! ```text
//! <data_dir>/
//!   patientData.json
//! ```

use crate::constants::RECORD_FILE_EXTENSION;
use crate::error::{IntakeError, IntakeResult};
use crate::record::PatientRecord;
use crate::validation::validate_storage_key;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Key-value storage for patient records.
pub trait RecordStore: Send + Sync {
    /// Reads the record stored under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> IntakeResult<Option<PatientRecord>>;

    /// Stores `record` under `key`, replacing any previous value.
    fn put(&self, key: &str, record: &PatientRecord) -> IntakeResult<()>;
}

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> IntakeResult<Option<PatientRecord>> {
        let entries = self.entries.lock().map_err(|_| IntakeError::StorePoisoned)?;
        entries
            .get(key)
            .map(|raw| PatientRecord::from_json(raw))
            .transpose()
    }

    fn put(&self, key: &str, record: &PatientRecord) -> IntakeResult<()> {
        let raw = record.to_json()?;
        let mut entries = self.entries.lock().map_err(|_| IntakeError::StorePoisoned)?;
        entries.insert(key.to_string(), raw);
        Ok(())
    }
}

/// Store that keeps one JSON file per key under a data directory.
///
/// The directory is created on the first write.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the file backing `key`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidInput` if `key` is not a safe file name.
    pub fn record_path(&self, key: &str) -> IntakeResult<PathBuf> {
        validate_storage_key(key)?;
        Ok(self
            .data_dir
            .join(format!("{key}.{RECORD_FILE_EXTENSION}")))
    }
}

impl RecordStore for FileStore {
    fn get(&self, key: &str) -> IntakeResult<Option<PatientRecord>> {
        let path = self.record_path(key)?;
        if !path.is_file() {
            tracing::debug!("no record stored at {}", path.display());
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(IntakeError::FileRead)?;
        PatientRecord::from_json(&raw).map(Some)
    }

    fn put(&self, key: &str, record: &PatientRecord) -> IntakeResult<()> {
        let path = self.record_path(key)?;
        let raw = record.to_json()?;

        fs::create_dir_all(&self.data_dir).map_err(IntakeError::StorageDirCreation)?;

        // Write then rename so a reader never sees a half-written record.
        let tmp_path = path.with_extension(format!("{RECORD_FILE_EXTENSION}.tmp"));
        fs::write(&tmp_path, raw).map_err(IntakeError::FileWrite)?;
        fs::rename(&tmp_path, &path).map_err(IntakeError::FileWrite)?;

        tracing::info!("stored patient record at {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_record() -> PatientRecord {
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
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("patientData").unwrap(), None);

        store.put("patientData", &sample_record()).unwrap();
        assert_eq!(store.get("patientData").unwrap(), Some(sample_record()));
        assert_eq!(store.get("otherKey").unwrap(), None);
    }

    #[test]
    fn test_memory_store_put_replaces_previous_value() {
        let store = MemoryStore::new();
        store.put("patientData", &sample_record()).unwrap();

        let mut second = sample_record();
        second.patient_id = "P-43".into();
        store.put("patientData", &second).unwrap();

        assert_eq!(store.get("patientData").unwrap().unwrap().patient_id, "P-43");
    }

    #[test]
    fn test_file_store_returns_none_before_first_write() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path().join("not-yet-created"));
        assert_eq!(store.get("patientData").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");
        let store = FileStore::new(&data_dir);

        store.put("patientData", &sample_record()).unwrap();

        let path = data_dir.join("patientData.json");
        assert!(path.is_file(), "record file should exist");
        assert!(
            !data_dir.join("patientData.json.tmp").exists(),
            "temporary file should be renamed away"
        );

        let restored = store.get("patientData").unwrap().expect("record should exist");
        assert_eq!(restored, sample_record());
    }

    #[test]
    fn test_file_store_rejects_unsafe_key() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path());

        let err = store
            .put("../outside", &sample_record())
            .expect_err("should reject key");
        assert!(matches!(err, IntakeError::InvalidInput(_)));
        assert!(matches!(
            store.get("a/b"),
            Err(IntakeError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_file_store_reports_corrupt_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path());
        fs::write(temp_dir.path().join("patientData.json"), "{ not json").unwrap();

        let err = store.get("patientData").expect_err("should fail to parse");
        assert!(matches!(err, IntakeError::Deserialization(_)));
    }

    #[test]
    fn test_file_store_reads_record_written_elsewhere() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::new(temp_dir.path());
        fs::write(
            temp_dir.path().join("patientData.json"),
            r#"{"subjectId":"1","patientId":"2","patientName":"N","age":"40","gender":"male","admitDate":"2024-01-01T00:00:00.000Z","dischargeDate":"2024-01-02T00:00:00.000Z","dischargeLocation":"home"}"#,
        )
        .unwrap();

        let record = store.get("patientData").unwrap().expect("record");
        assert_eq!(record.admit_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(record.discharge_location, "home");
    }
}
