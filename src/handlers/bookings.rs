use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, NewBooking};
use crate::services::profile::{self, ProfileSummary};
use crate::state::AppState;

// GET /api/bookings
pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.facade.get_all_bookings().await?))
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewBooking>,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state.facade.create_booking(payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Booking>, AppError> {
    state
        .facade
        .get_booking(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}

// POST /api/bookings/:id/status
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Booking>, AppError> {
    state
        .facade
        .update_booking_status(id, payload.status)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))
}

// DELETE /api/bookings/:id
pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if state.facade.delete_booking(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("booking {id}")))
    }
}

// POST /api/mirror/restore
pub async fn restore_from_mirror(State(state): State<Arc<AppState>>) -> StatusCode {
    state.facade.restore_from_mirror().await;
    StatusCode::NO_CONTENT
}

// GET /api/users/:user_id/bookings
pub async fn user_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Booking>>, AppError> {
    Ok(Json(state.facade.get_bookings_by_user_id(user_id).await?))
}

// GET /api/users/:user_id/profile
pub async fn user_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<ProfileSummary>, AppError> {
    Ok(Json(profile::profile_summary(&state.facade, user_id).await?))
}
