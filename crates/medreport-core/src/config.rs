//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the views. Core
//! code never reads environment variables itself; binaries read them and hand the raw
//! values to [`CoreConfig::from_env_values`].

use crate::constants::{DEFAULT_DATA_DIR, PATIENT_DATA_KEY};
use crate::error::IntakeResult;
use crate::storage::FileStore;
use crate::validation::validate_storage_key;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    storage_key: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidInput` if `storage_key` is not a safe file name.
    pub fn new(data_dir: PathBuf, storage_key: impl Into<String>) -> IntakeResult<Self> {
        let storage_key = storage_key.into();
        validate_storage_key(&storage_key)?;

        Ok(Self {
            data_dir,
            storage_key,
        })
    }

    /// Builds the configuration from optional raw values, e.g. environment variables.
    ///
    /// Missing or blank values fall back to [`DEFAULT_DATA_DIR`] and [`PATIENT_DATA_KEY`].
    pub fn from_env_values(
        data_dir: Option<String>,
        storage_key: Option<String>,
    ) -> IntakeResult<Self> {
        fn non_blank(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let data_dir = non_blank(data_dir).unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        let storage_key = non_blank(storage_key).unwrap_or_else(|| PATIENT_DATA_KEY.into());

        Self::new(PathBuf::from(data_dir), storage_key)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// File-backed store rooted at the configured data directory.
    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IntakeError;

    #[test]
    fn test_defaults_when_values_missing() {
        let cfg = CoreConfig::from_env_values(None, Some("   ".into())).unwrap();
        assert_eq!(cfg.data_dir(), Path::new(DEFAULT_DATA_DIR));
        assert_eq!(cfg.storage_key(), PATIENT_DATA_KEY);
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let cfg =
            CoreConfig::from_env_values(Some("/tmp/intake".into()), Some("wardB".into())).unwrap();
        assert_eq!(cfg.data_dir(), Path::new("/tmp/intake"));
        assert_eq!(cfg.storage_key(), "wardB");
        assert_eq!(cfg.file_store().data_dir(), Path::new("/tmp/intake"));
    }

    #[test]
    fn test_rejects_unsafe_storage_key() {
        let err = CoreConfig::new(PathBuf::from("data"), "../etc/passwd")
            .expect_err("should reject key");
        assert!(matches!(err, IntakeError::InvalidInput(_)));
    }
}
