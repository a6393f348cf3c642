use axum::http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Booking store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Booking store is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Bookings could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Missing required fields.")]
    MissingFields,

    #[error("Invalid email format.")]
    InvalidEmail,

    #[error("Invalid time slot.")]
    InvalidTimeSlot,

    #[error("Invalid date.")]
    InvalidDate,

    #[error("Cannot book a past date.")]
    PastDate,

    #[error("You must agree to the meeting rules.")]
    MustAgree,

    #[error("That slot is already booked. Please choose another.")]
    SlotTaken,

    #[error(transparent)]
    Storage(#[from] StoreError),

    #[error("Booking worker failed: {0}")]
    Worker(String),
}

impl BookingError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookingError::MissingFields
            | BookingError::InvalidEmail
            | BookingError::InvalidTimeSlot
            | BookingError::InvalidDate
            | BookingError::PastDate
            | BookingError::MustAgree => StatusCode::BAD_REQUEST,
            BookingError::SlotTaken => StatusCode::CONFLICT,
            BookingError::Storage(_) | BookingError::Worker(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text safe to hand back to the client.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".into(),
            _ => self.to_string(),
        }
    }
}
