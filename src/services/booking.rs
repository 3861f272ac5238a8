use std::sync::Arc;

use crate::errors::{CreateBookingError, LoadError};
use crate::models::{Booking, BookingStatus, MockData, NewBooking, ServiceDetails};
use crate::repository::Repository;
use crate::services::clock::Clock;

/// Single access point for reads and writes of the bookings collection.
///
/// Every operation loads the document, edits it and saves it back. There is
/// no locking between operations, so overlapping writes keep the last save.
#[derive(Clone)]
pub struct BookingFacade {
    repo: Arc<dyn Repository>,
    clock: Arc<dyn Clock>,
}

impl BookingFacade {
    pub fn new(repo: Arc<dyn Repository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn get_bookings_by_user_id(&self, user_id: i64) -> Result<Vec<Booking>, LoadError> {
        let data = self.repo.load().await?;
        Ok(data
            .bookings
            .into_iter()
            .filter(|b| b.user_id == user_id)
            .collect())
    }

    pub async fn create_booking(
        &self,
        new_booking: NewBooking,
    ) -> Result<Booking, CreateBookingError> {
        let mut data = self.repo.load().await?;

        let id = data
            .bookings
            .iter()
            .map(|b| b.id)
            .fold(0, i64::max)
            .checked_add(1)
            .ok_or(CreateBookingError::IdsExhausted)?;
        let booking = new_booking.into_booking(id, self.clock.timestamp());

        data.bookings.push(booking.clone());
        self.repo.save(data).await;

        tracing::info!(
            booking_id = booking.id,
            service_id = booking.service_id,
            user_id = booking.user_id,
            date = %booking.date,
            time = %booking.time,
            "booking created"
        );
        Ok(booking)
    }

    /// Returns `None` when no booking has the given id.
    pub async fn update_booking_status(
        &self,
        id: i64,
        status: BookingStatus,
    ) -> Result<Option<Booking>, LoadError> {
        let mut data = self.repo.load().await?;

        let Some(booking) = data.bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.status = status;
        let updated = booking.clone();

        self.repo.save(data).await;
        tracing::info!(booking_id = id, status = status.as_str(), "booking status updated");
        Ok(Some(updated))
    }

    pub async fn delete_booking(&self, id: i64) -> Result<bool, LoadError> {
        let mut data = self.repo.load().await?;

        let Some(index) = data.bookings.iter().position(|b| b.id == id) else {
            return Ok(false);
        };
        data.bookings.remove(index);

        self.repo.save(data).await;
        tracing::info!(booking_id = id, "booking deleted");
        Ok(true)
    }

    pub async fn get_all_bookings(&self) -> Result<Vec<Booking>, LoadError> {
        Ok(self.repo.load().await?.bookings)
    }

    pub async fn get_booking(&self, id: i64) -> Result<Option<Booking>, LoadError> {
        let data = self.repo.load().await?;
        Ok(data.bookings.into_iter().find(|b| b.id == id))
    }

    /// The service with its provider, as shown on the service details page.
    pub async fn get_service(&self, id: i64) -> Result<Option<ServiceDetails>, LoadError> {
        let data = self.repo.load().await?;
        let Some(service) = data.service(id).cloned() else {
            return Ok(None);
        };
        let entrepreneur = service
            .entrepreneur_id
            .and_then(|eid| data.entrepreneur(eid))
            .cloned();
        Ok(Some(ServiceDetails {
            service,
            entrepreneur,
        }))
    }

    pub async fn restore_from_mirror(&self) {
        self.repo.restore().await;
    }

    pub(crate) async fn load_document(&self) -> Result<MockData, LoadError> {
        self.repo.load().await
    }
}
