pub mod bookings;
pub mod calendar;
pub mod health;
pub mod selection;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/api/bookings/:id",
            get(bookings::get_booking).delete(bookings::delete_booking),
        )
        .route("/api/bookings/:id/status", post(bookings::update_status))
        .route("/api/mirror/restore", post(bookings::restore_from_mirror))
        .route("/api/users/:user_id/bookings", get(bookings::user_bookings))
        .route("/api/users/:user_id/profile", get(bookings::user_profile))
        .route("/api/services/:id", get(services::get_service))
        .route("/api/calendar", get(calendar::month_view))
        .route("/api/selections", post(selection::open_selection))
        .route(
            "/api/selections/:id",
            get(selection::get_selection).delete(selection::close_selection),
        )
        .route("/api/selections/:id/date", post(selection::select_date))
        .route("/api/selections/:id/time", post(selection::select_time))
        .route("/api/selections/:id/month", post(selection::navigate_month))
        .route("/api/selections/:id/confirm", post(selection::confirm))
        .with_state(state)
}
