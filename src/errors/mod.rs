use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum TrackerError {
    DataLoadError(String),
    NotFoundError(String),
    InvalidStateError(String),
    PersistenceError(String),
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackerError::DataLoadError(msg) => write!(f, "Data Load Error: {}", msg),
            TrackerError::NotFoundError(msg) => write!(f, "Not Found Error: {}", msg),
            TrackerError::InvalidStateError(msg) => write!(f, "Invalid State Error: {}", msg),
            TrackerError::PersistenceError(msg) => write!(f, "Persistence Error: {}", msg),
        }
    }
}

impl Error for TrackerError {}

pub type Result<T> = std::result::Result<T, TrackerError>;
