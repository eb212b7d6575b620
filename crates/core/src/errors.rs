use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Schedule conflict: {0}")]
    Conflict(String),

    #[error("Slot unavailable: {0}")]
    AlreadyBooked(String),

    #[error("Lookup failed: {0}")]
    LookupFailed(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SlotResult<T> = Result<T, SlotError>;
