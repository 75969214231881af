use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Booking conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl BookingError {
    pub fn validation(reason: impl Into<String>) -> Self {
        BookingError::Validation(reason.into())
    }

    pub fn not_found(reason: impl Into<String>) -> Self {
        BookingError::NotFound(reason.into())
    }

    pub fn conflict(reason: impl Into<String>) -> Self {
        BookingError::Conflict(reason.into())
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
