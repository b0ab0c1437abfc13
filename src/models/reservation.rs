use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationError};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReservationError {
    #[error("Invalid reservation: {message}")]
    InvalidRequest { message: String },

    #[error("Invalid date '{value}'. Use YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid time '{value}'. Use HH:MM")]
    InvalidTime { value: String },

    #[error("Reservation date {date} is before today ({today})")]
    DateInPast { date: NaiveDate, today: NaiveDate },
}

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    #[validate(custom = "validate_guest_name")]
    pub name: String,

    #[validate(length(min = 1, max = 10, message = "Date must be YYYY-MM-DD"))]
    pub date: String,

    #[validate(length(min = 1, max = 5, message = "Time must be HH:MM"))]
    pub time: String,
}

fn validate_guest_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("Name is required"));
    }
    Ok(())
}

/// A checked table booking. Nothing is stored; it only drives the acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl ReservationRequest {
    pub fn new(name: &str, date: &str, time: &str) -> Self {
        Self {
            name: name.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    /// Check the form fields. `today` is the earliest date that can be booked.
    pub fn into_reservation(self, today: NaiveDate) -> Result<Reservation, ReservationError> {
        self.validate().map_err(|e| ReservationError::InvalidRequest {
            message: e.to_string(),
        })?;

        let date = NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT)
            .map_err(|_| ReservationError::InvalidDate { value: self.date.clone() })?;
        if date < today {
            return Err(ReservationError::DateInPast { date, today });
        }

        let time = NaiveTime::parse_from_str(self.time.trim(), TIME_FORMAT)
            .map_err(|_| ReservationError::InvalidTime { value: self.time.clone() })?;

        Ok(Reservation {
            name: self.name.trim().to_string(),
            date,
            time,
        })
    }
}

impl Reservation {
    pub fn date_text(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_text(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}
