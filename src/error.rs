use thiserror::Error;

/// Errors raised by review operations on the in-memory session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    #[error("Doctor not found at row {0}")]
    DoctorNotFound(usize),

    #[error("Duplicate doctor name in seed data: {0}")]
    DuplicateName(String),
}
