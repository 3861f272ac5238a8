use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Booking, BookingStatus, NewBooking};
use crate::services::booking::BookingFacade;
use crate::services::calendar::{self, MonthView};

pub const SUCCESS_NOTICE: &str = "Agendamento confirmado com sucesso!";
pub const FAILURE_NOTICE: &str = "Erro ao criar agendamento. Tente novamente.";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionState {
    NoDateSelected,
    DateSelected,
    DateAndTimeSelected,
    Submitting,
    Confirmed,
    Failed,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("{0} is in the past and cannot be booked")]
    DateUnavailable(NaiveDate),

    #[error("choose a date before choosing a time")]
    NoDateSelected,

    #[error("{0} is not an offered time slot")]
    UnknownSlot(String),

    #[error("choose a date and a time before confirming")]
    IncompleteSelection,

    #[error("sign in to confirm a booking")]
    NotAuthenticated,

    #[error("a booking is already being submitted")]
    AlreadySubmitting,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingOutcome {
    Confirmed {
        booking: Booking,
        notice: &'static str,
    },
    Failed {
        message: &'static str,
    },
}

impl BookingOutcome {
    /// What the modal shows for the result of `create_booking`.
    pub fn from_result<E: std::fmt::Display>(result: Result<Booking, E>) -> Self {
        match result {
            Ok(booking) => BookingOutcome::Confirmed {
                booking,
                notice: SUCCESS_NOTICE,
            },
            Err(e) => {
                tracing::error!(error = %e, "error creating booking");
                BookingOutcome::Failed {
                    message: FAILURE_NOTICE,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Selecting,
    Submitting,
    Confirmed,
    Failed,
}

/// Date-then-time picker for one service, as driven by a booking modal.
///
/// The displayed month moves independently of the selection. A time can only
/// be held while a date is, and picking another date drops the time.
#[derive(Debug, Clone)]
pub struct BookingSelection {
    service_id: i64,
    selected_date: Option<NaiveDate>,
    selected_time: Option<String>,
    current_month: NaiveDate,
    phase: Phase,
}

impl BookingSelection {
    pub fn new(service_id: i64, today: NaiveDate) -> Self {
        Self {
            service_id,
            selected_date: None,
            selected_time: None,
            current_month: calendar::first_of_month(today),
            phase: Phase::Selecting,
        }
    }

    pub fn service_id(&self) -> i64 {
        self.service_id
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn state(&self) -> SelectionState {
        match self.phase {
            Phase::Submitting => SelectionState::Submitting,
            Phase::Confirmed => SelectionState::Confirmed,
            Phase::Failed => SelectionState::Failed,
            Phase::Selecting => match (&self.selected_date, &self.selected_time) {
                (None, _) => SelectionState::NoDateSelected,
                (Some(_), None) => SelectionState::DateSelected,
                (Some(_), Some(_)) => SelectionState::DateAndTimeSelected,
            },
        }
    }

    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), SelectionError> {
        self.ensure_not_submitting()?;
        if !calendar::is_date_available(date, today) {
            return Err(SelectionError::DateUnavailable(date));
        }

        self.selected_date = Some(date);
        self.selected_time = None;
        self.phase = Phase::Selecting;
        Ok(())
    }

    pub fn select_time(&mut self, time: &str) -> Result<(), SelectionError> {
        self.ensure_not_submitting()?;
        if self.selected_date.is_none() {
            return Err(SelectionError::NoDateSelected);
        }
        if !calendar::is_time_slot(time) {
            return Err(SelectionError::UnknownSlot(time.to_string()));
        }

        self.selected_time = Some(time.to_string());
        self.phase = Phase::Selecting;
        Ok(())
    }

    pub fn navigate_month(&mut self, delta: i32) {
        self.current_month = calendar::shift_month(self.current_month, delta);
    }

    /// Locks the selection and returns the booking to create. Must be
    /// followed by [`complete_submit`](Self::complete_submit).
    pub fn begin_submit(&mut self, user_id: Option<i64>) -> Result<NewBooking, SelectionError> {
        self.ensure_not_submitting()?;
        let (Some(date), Some(time)) = (self.selected_date, self.selected_time.clone()) else {
            return Err(SelectionError::IncompleteSelection);
        };
        let user_id = user_id.ok_or(SelectionError::NotAuthenticated)?;

        self.phase = Phase::Submitting;
        Ok(NewBooking {
            service_id: self.service_id,
            user_id,
            date: date.format("%Y-%m-%d").to_string(),
            time,
            status: BookingStatus::Confirmed,
        })
    }

    pub fn complete_submit<E: std::fmt::Display>(
        &mut self,
        result: Result<Booking, E>,
    ) -> BookingOutcome {
        let outcome = BookingOutcome::from_result(result);
        self.finish_submit(&outcome);
        outcome
    }

    /// Leaves `Submitting` according to an outcome computed elsewhere.
    pub fn finish_submit(&mut self, outcome: &BookingOutcome) {
        match outcome {
            BookingOutcome::Confirmed { .. } => {
                self.selected_date = None;
                self.selected_time = None;
                self.phase = Phase::Confirmed;
            }
            BookingOutcome::Failed { .. } => self.phase = Phase::Failed,
        }
    }

    pub async fn confirm(
        &mut self,
        facade: &BookingFacade,
        user_id: Option<i64>,
    ) -> Result<BookingOutcome, SelectionError> {
        let new_booking = self.begin_submit(user_id)?;
        let result = facade.create_booking(new_booking).await;
        Ok(self.complete_submit(result))
    }

    pub fn view(&self, today: NaiveDate) -> SelectionView {
        let time_slots = match self.selected_date {
            Some(_) => calendar::TIME_SLOTS.to_vec(),
            None => vec![],
        };
        let summary = match (self.selected_date, self.selected_time.as_deref()) {
            (Some(date), Some(time)) => Some(SelectionSummary {
                date: calendar::format_long_date(date),
                time: time.to_string(),
            }),
            _ => None,
        };

        SelectionView {
            state: self.state(),
            service_id: self.service_id,
            selected_date: self.selected_date.map(|d| d.format("%Y-%m-%d").to_string()),
            selected_time: self.selected_time.clone(),
            calendar: calendar::month_view(self.current_month, today, self.selected_date),
            time_slots,
            summary,
            error: (self.phase == Phase::Failed).then_some(FAILURE_NOTICE),
        }
    }

    fn ensure_not_submitting(&self) -> Result<(), SelectionError> {
        if self.phase == Phase::Submitting {
            return Err(SelectionError::AlreadySubmitting);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SelectionSummary {
    pub date: String,
    pub time: String,
}

/// Everything a booking modal needs to render the current selection.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionView {
    pub state: SelectionState,
    pub service_id: i64,
    pub selected_date: Option<String>,
    pub selected_time: Option<String>,
    pub calendar: MonthView,
    pub time_slots: Vec<&'static str>,
    pub summary: Option<SelectionSummary>,
    pub error: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::errors::LoadError;
    use crate::models::MockData;
    use crate::repository::{InMemoryRepository, Repository};
    use crate::services::clock::FixedClock;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn today() -> NaiveDate {
        d(2025, 5, 20)
    }

    fn facade_with(repo: Arc<dyn Repository>) -> BookingFacade {
        BookingFacade::new(repo, Arc::new(FixedClock::on(today())))
    }

    struct UnreachableRepository;

    #[async_trait]
    impl Repository for UnreachableRepository {
        async fn load(&self) -> Result<MockData, LoadError> {
            Err(LoadError::Fetch("network down".to_string()))
        }

        async fn save(&self, _data: MockData) {}

        async fn restore(&self) {}
    }

    #[test]
    fn test_starts_on_current_month_with_nothing_selected() {
        let selection = BookingSelection::new(2, today());
        assert_eq!(selection.state(), SelectionState::NoDateSelected);
        assert_eq!(selection.current_month(), d(2025, 5, 1));
    }

    #[test]
    fn test_changing_date_clears_time() {
        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("11:00").unwrap();
        assert_eq!(selection.state(), SelectionState::DateAndTimeSelected);

        selection.select_date(d(2025, 6, 2), today()).unwrap();
        assert_eq!(selection.state(), SelectionState::DateSelected);
        assert_eq!(selection.selected_time(), None);
    }

    #[test]
    fn test_past_dates_rejected_today_accepted() {
        let mut selection = BookingSelection::new(2, today());
        assert_eq!(
            selection.select_date(d(2025, 5, 19), today()),
            Err(SelectionError::DateUnavailable(d(2025, 5, 19)))
        );
        assert_eq!(selection.state(), SelectionState::NoDateSelected);

        selection.select_date(today(), today()).unwrap();
        assert_eq!(selection.selected_date(), Some(today()));
    }

    #[test]
    fn test_rejected_date_keeps_previous_selection() {
        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("09:00").unwrap();

        assert!(selection.select_date(d(2025, 1, 1), today()).is_err());
        assert_eq!(selection.selected_date(), Some(d(2025, 6, 1)));
        assert_eq!(selection.selected_time(), Some("09:00"));
    }

    #[test]
    fn test_time_requires_date_and_known_slot() {
        let mut selection = BookingSelection::new(2, today());
        assert_eq!(selection.select_time("09:00"), Err(SelectionError::NoDateSelected));

        selection.select_date(d(2025, 6, 1), today()).unwrap();
        assert_eq!(
            selection.select_time("12:30"),
            Err(SelectionError::UnknownSlot("12:30".to_string()))
        );
        assert_eq!(selection.state(), SelectionState::DateSelected);
    }

    #[test]
    fn test_navigation_does_not_touch_selection() {
        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("10:00").unwrap();

        selection.navigate_month(1);
        selection.navigate_month(1);
        selection.navigate_month(-1);
        assert_eq!(selection.current_month(), d(2025, 6, 1));
        assert_eq!(selection.state(), SelectionState::DateAndTimeSelected);
    }

    #[test]
    fn test_submit_requires_complete_selection_and_user() {
        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        assert_eq!(selection.begin_submit(Some(7)), Err(SelectionError::IncompleteSelection));

        selection.select_time("10:00").unwrap();
        assert_eq!(selection.begin_submit(None), Err(SelectionError::NotAuthenticated));
        assert_eq!(selection.state(), SelectionState::DateAndTimeSelected);
    }

    #[test]
    fn test_submitting_blocks_changes() {
        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("10:00").unwrap();

        let request = selection.begin_submit(Some(7)).unwrap();
        assert_eq!(request.date, "2025-06-01");
        assert_eq!(selection.state(), SelectionState::Submitting);

        assert_eq!(selection.begin_submit(Some(7)), Err(SelectionError::AlreadySubmitting));
        assert_eq!(
            selection.select_date(d(2025, 6, 2), today()),
            Err(SelectionError::AlreadySubmitting)
        );
        assert_eq!(selection.select_time("11:00"), Err(SelectionError::AlreadySubmitting));

        selection.navigate_month(1);
        assert_eq!(selection.current_month(), d(2025, 6, 1));
    }

    #[tokio::test]
    async fn test_confirm_creates_one_booking() {
        let repo = Arc::new(InMemoryRepository::default());
        let facade = facade_with(repo.clone());

        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("11:00").unwrap();

        let outcome = selection.confirm(&facade, Some(7)).await.unwrap();
        let BookingOutcome::Confirmed { booking, notice } = outcome else {
            panic!("expected a confirmed booking");
        };
        assert_eq!(notice, SUCCESS_NOTICE);
        assert_eq!(booking.date, "2025-06-01");
        assert_eq!(booking.time, "11:00");
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.user_id, 7);
        assert_eq!(booking.service_id, 2);

        assert_eq!(repo.snapshot().bookings, vec![booking]);
        assert_eq!(selection.state(), SelectionState::Confirmed);
        assert_eq!(selection.selected_date(), None);
        assert_eq!(selection.selected_time(), None);
    }

    #[tokio::test]
    async fn test_failed_confirm_keeps_selection_for_retry() {
        let failing = facade_with(Arc::new(UnreachableRepository));

        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("11:00").unwrap();

        let outcome = selection.confirm(&failing, Some(7)).await.unwrap();
        assert_eq!(outcome, BookingOutcome::Failed { message: FAILURE_NOTICE });
        assert_eq!(selection.state(), SelectionState::Failed);
        assert_eq!(selection.view(today()).error, Some(FAILURE_NOTICE));

        let repo = Arc::new(InMemoryRepository::default());
        let working = facade_with(repo.clone());
        let retried = selection.confirm(&working, Some(7)).await.unwrap();
        assert!(matches!(retried, BookingOutcome::Confirmed { .. }));
        assert_eq!(repo.snapshot().bookings.len(), 1);
    }

    #[test]
    fn test_view_reveals_slots_and_summary_progressively() {
        let mut selection = BookingSelection::new(2, today());
        let view = selection.view(today());
        assert!(view.time_slots.is_empty());
        assert_eq!(view.summary, None);
        assert_eq!(view.calendar.month, "2025-05");

        selection.select_date(d(2025, 6, 1), today()).unwrap();
        let view = selection.view(today());
        assert_eq!(view.time_slots.len(), calendar::TIME_SLOTS.len());
        assert_eq!(view.summary, None);

        selection.select_time("14:00").unwrap();
        let view = selection.view(today());
        assert_eq!(view.state, SelectionState::DateAndTimeSelected);
        assert_eq!(
            view.summary,
            Some(SelectionSummary {
                date: "domingo, 1 de junho de 2025".to_string(),
                time: "14:00".to_string(),
            })
        );
        assert_eq!(view.error, None);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["selectedTime"], "14:00");
        assert_eq!(json["timeSlots"][0], "09:00");
    }

    #[tokio::test]
    async fn test_exhausted_ids_fail_like_any_other_error() {
        let repo = Arc::new(InMemoryRepository::new(MockData::with_bookings(vec![Booking {
            id: i64::MAX,
            service_id: 1,
            user_id: 1,
            date: "2025-06-01".to_string(),
            time: "09:00".to_string(),
            status: BookingStatus::Confirmed,
            created_at: "2025-05-01T10:00:00.000Z".to_string(),
        }])));
        let facade = facade_with(repo.clone());

        let mut selection = BookingSelection::new(2, today());
        selection.select_date(d(2025, 6, 1), today()).unwrap();
        selection.select_time("09:00").unwrap();

        let outcome = selection.confirm(&facade, Some(7)).await.unwrap();
        assert_eq!(outcome, BookingOutcome::Failed { message: FAILURE_NOTICE });
        assert_eq!(selection.selected_time(), Some("09:00"));
        assert_eq!(repo.snapshot().bookings.len(), 1);
    }
}
