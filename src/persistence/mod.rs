use crate::Project;
use crate::task::Task;
use crate::validation::{self, ValidationReport};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum PersistenceError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    #[cfg(feature = "sqlite")]
    Sqlite(rusqlite::Error),
    Csv(csv::Error),
    InvalidData(String),
    Validation(ValidationReport),
    NotFound,
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Serialization(err) => write!(f, "serialization error: {err}"),
            PersistenceError::Io(err) => write!(f, "io error: {err}"),
            #[cfg(feature = "sqlite")]
            PersistenceError::Sqlite(err) => write!(f, "sqlite error: {err}"),
            PersistenceError::Csv(err) => write!(f, "csv error: {err}"),
            PersistenceError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            PersistenceError::Validation(report) => write!(f, "validation error: {report}"),
            PersistenceError::NotFound => write!(f, "no project stored"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<SerdeJsonError> for PersistenceError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for PersistenceError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for PersistenceError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<csv::Error> for PersistenceError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<ValidationReport> for PersistenceError {
    fn from(value: ValidationReport) -> Self {
        Self::Validation(value)
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage backends keep whole projects keyed by name, like the original
/// application's projects table.
pub trait ProjectStore {
    fn save_project(&self, project: &Project) -> PersistenceResult<()>;
    fn load_project(&self, name: &str) -> PersistenceResult<Option<Project>>;
    fn list_projects(&self) -> PersistenceResult<Vec<String>>;
    fn delete_project(&self, name: &str) -> PersistenceResult<bool>;
}

/// Saves are blocked until the task set validates cleanly.
pub fn validate_tasks(tasks: &[Task]) -> PersistenceResult<()> {
    validation::validate_tasks(tasks).map_err(PersistenceError::Validation)
}

pub mod file;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use file::{
    load_project_from_csv, load_project_from_json, save_project_to_csv, save_project_to_json,
    split_predecessors,
};
