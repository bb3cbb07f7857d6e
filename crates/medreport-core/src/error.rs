use crate::record::Field;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("{} is required", .0.label())]
    MissingField(Field),
    #[error("Please enter a valid age")]
    InvalidAge,
    #[error("no patient record is stored")]
    MissingRecord,
    #[error("patient record failed validation: {0}")]
    Validation(ValidationErrors),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write record file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read record file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize patient record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize patient record: {0}")]
    Deserialization(serde_json::Error),
    #[error("record store lock was poisoned")]
    StorePoisoned,
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
