use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::selection::{BookingOutcome, BookingSelection, SelectionView};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SelectionResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub view: SelectionView,
}

/// `selection` is the closed modal's final view, or `None` when the session
/// was closed while the booking was being created.
#[derive(Serialize)]
pub struct ConfirmResponse {
    pub booking: Booking,
    pub notice: &'static str,
    pub selection: Option<SelectionResponse>,
}

fn with_selection<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingSelection) -> Result<T, AppError>,
) -> Result<T, AppError> {
    state
        .selections
        .with(id, state.clock.now(), f)
        .unwrap_or_else(|| Err(AppError::NotFound(format!("selection {id}"))))
}

fn respond(state: &AppState, id: Uuid, selection: &BookingSelection) -> SelectionResponse {
    SelectionResponse {
        id,
        view: selection.view(state.clock.today()),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenSelectionRequest {
    pub service_id: i64,
}

// POST /api/selections
pub async fn open_selection(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<OpenSelectionRequest>,
) -> (StatusCode, Json<SelectionResponse>) {
    let id = Uuid::new_v4();
    let selection = BookingSelection::new(payload.service_id, state.clock.today());
    let response = respond(&state, id, &selection);

    state.selections.open(id, selection, state.clock.now());

    tracing::debug!(selection_id = %id, service_id = payload.service_id, "selection opened");
    (StatusCode::CREATED, Json(response))
}

// GET /api/selections/:id
pub async fn get_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionResponse>, AppError> {
    with_selection(&state, id, |s| Ok(Json(respond(&state, id, s))))
}

// DELETE /api/selections/:id
pub async fn close_selection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    match state.selections.close(id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(AppError::NotFound(format!("selection {id}"))),
    }
}

#[derive(Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

// POST /api/selections/:id/date
pub async fn select_date(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectDateRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {}", payload.date)))?;
    let today = state.clock.today();

    with_selection(&state, id, |s| {
        s.select_date(date, today)?;
        Ok(Json(respond(&state, id, s)))
    })
}

#[derive(Deserialize)]
pub struct SelectTimeRequest {
    pub time: String,
}

// POST /api/selections/:id/time
pub async fn select_time(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectTimeRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    with_selection(&state, id, |s| {
        s.select_time(&payload.time)?;
        Ok(Json(respond(&state, id, s)))
    })
}

#[derive(Deserialize)]
pub struct NavigateMonthRequest {
    pub delta: i32,
}

// POST /api/selections/:id/month
pub async fn navigate_month(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<NavigateMonthRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    with_selection(&state, id, |s| {
        s.navigate_month(payload.delta);
        Ok(Json(respond(&state, id, s)))
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub user_id: Option<i64>,
}

// POST /api/selections/:id/confirm
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, AppError> {
    let new_booking = with_selection(&state, id, |s| Ok(s.begin_submit(payload.user_id)?))?;

    // The session stays in Submitting while the lock is released.
    let result = state.facade.create_booking(new_booking).await;

    let outcome = BookingOutcome::from_result(result);
    let selection = state.selections.with(id, state.clock.now(), |s| {
        s.finish_submit(&outcome);
        respond(&state, id, s)
    });
    if selection.is_none() {
        tracing::debug!(selection_id = %id, "selection closed during confirm");
    }

    match outcome {
        BookingOutcome::Confirmed { booking, notice } => {
            // A confirmed modal closes.
            state.selections.close(id);
            Ok(Json(ConfirmResponse {
                booking,
                notice,
                selection,
            }))
        }
        BookingOutcome::Failed { message } => Err(AppError::BookingFailed(message)),
    }
}
