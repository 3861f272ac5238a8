use serde::Serialize;

use crate::errors::LoadError;
use crate::models::{Booking, BookingStatus, Service};
use crate::services::booking::BookingFacade;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBooking {
    #[serde(flatten)]
    pub booking: Booking,
    pub status_label: &'static str,
    pub service: Option<Service>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub user_id: i64,
    pub total: usize,
    pub completed: usize,
    pub upcoming: usize,
    pub total_invested: f64,
    pub bookings: Vec<ProfileBooking>,
}

/// Bookings of one user joined with their services, plus the profile counters.
pub async fn profile_summary(
    facade: &BookingFacade,
    user_id: i64,
) -> Result<ProfileSummary, LoadError> {
    let data = facade.load_document().await?;

    let bookings: Vec<ProfileBooking> = data
        .bookings
        .iter()
        .filter(|b| b.user_id == user_id)
        .map(|b| ProfileBooking {
            booking: b.clone(),
            status_label: b.status.label(),
            service: data.service(b.service_id).cloned(),
        })
        .collect();

    let completed = bookings
        .iter()
        .filter(|b| b.booking.status == BookingStatus::Completed)
        .count();
    let upcoming = bookings.iter().filter(|b| b.booking.status.is_upcoming()).count();
    let total_invested: f64 = bookings
        .iter()
        .map(|b| b.service.as_ref().map_or(0.0, |s| s.price))
        .sum();

    Ok(ProfileSummary {
        user_id,
        total: bookings.len(),
        completed,
        upcoming,
        total_invested,
        bookings,
    })
}
