//! Error types for ActivityHub Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("Registration closed: attendance already finalized")]
    RegistrationClosed,

    #[error("Already registered for this event: {0}")]
    AlreadyRegistered(String),

    #[error("Cannot unregister after attendance is finalized")]
    AttendanceLocked,

    #[error("Attendance already locked")]
    AlreadyLocked,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Student ID already registered: {0}")]
    DuplicateStudentId(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
