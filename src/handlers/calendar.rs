use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::calendar::{self, MonthView};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub month: Option<String>,
}

// GET /api/calendar?month=YYYY-MM
pub async fn month_view(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<MonthView>, AppError> {
    let today = state.clock.today();
    let month = match query.month.as_deref() {
        Some(raw) => calendar::parse_month(raw)
            .ok_or_else(|| AppError::BadRequest(format!("invalid month: {raw}")))?,
        None => today,
    };

    Ok(Json(calendar::month_view(month, today, None)))
}
