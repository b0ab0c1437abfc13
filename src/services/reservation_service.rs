use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{
    notification::Notification,
    reservation::{Reservation, ReservationError, ReservationRequest},
};

#[derive(Debug, Clone, Serialize)]
pub struct ReservationUpdate {
    pub reservation: Reservation,
    pub notification: Notification,
}

/// Check a table reservation and acknowledge it. Nothing is booked or kept.
pub fn submit_reservation(
    request: ReservationRequest,
    today: NaiveDate,
) -> Result<ReservationUpdate, ReservationError> {
    let reservation = request.into_reservation(today).map_err(|e| {
        warn!("Reservation rejected: {}", e);
        e
    })?;

    let (date, time) = (reservation.date_text(), reservation.time_text());
    info!("Reservation received for '{}' on {} at {}", reservation.name, date, time);

    let notification = Notification::reservation_received(&reservation.name, &date, &time);
    Ok(ReservationUpdate {
        reservation,
        notification,
    })
}
