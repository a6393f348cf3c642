use crate::{
    errors::BookingError,
    types::{format_date, parse_date, BookingRequest, MAX_MESSAGE_CHARS, TIME_SLOTS},
};
use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

/// A submission that passed every check, with its fields normalised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub date: NaiveDate,
    pub time: String,
    pub email: String,
    pub message: String,
}

impl ValidatedBooking {
    pub fn date_key(&self) -> String {
        format_date(self.date)
    }
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().map(str::trim).unwrap_or("")
}

/// Runs the checks in order and reports the first one that fails.
pub fn validate(
    request: &BookingRequest,
    today: NaiveDate,
) -> Result<ValidatedBooking, BookingError> {
    let date = trimmed(&request.date);
    let time = trimmed(&request.time);
    let email = trimmed(&request.email);

    if date.is_empty() || time.is_empty() || email.is_empty() {
        return Err(BookingError::MissingFields);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(BookingError::InvalidEmail);
    }
    if !TIME_SLOTS.contains(&time) {
        return Err(BookingError::InvalidTimeSlot);
    }
    let date = parse_date(date).ok_or(BookingError::InvalidDate)?;
    if date < today {
        return Err(BookingError::PastDate);
    }
    if !request.agreed() {
        return Err(BookingError::MustAgree);
    }

    Ok(ValidatedBooking {
        date,
        time: time.to_string(),
        email: email.to_string(),
        message: trimmed(&request.message)
            .chars()
            .take(MAX_MESSAGE_CHARS)
            .collect(),
    })
}
