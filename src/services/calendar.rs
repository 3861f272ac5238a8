use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

/// Appointment times offered for every selectable day.
pub const TIME_SLOTS: [&str; 7] = ["09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00"];

pub const WEEKDAY_HEADERS: [&str; 7] = ["Dom", "Seg", "Ter", "Qua", "Qui", "Sex", "Sáb"];

const MONTH_NAMES: [&str; 12] = [
    "janeiro", "fevereiro", "março", "abril", "maio", "junho", "julho", "agosto", "setembro",
    "outubro", "novembro", "dezembro",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "domingo",
    "segunda-feira",
    "terça-feira",
    "quarta-feira",
    "quinta-feira",
    "sexta-feira",
    "sábado",
];

pub fn is_time_slot(time: &str) -> bool {
    TIME_SLOTS.contains(&time)
}

/// A day can be booked from today onwards.
pub fn is_date_available(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `delta` months away from `month`.
pub fn shift_month(month: NaiveDate, delta: i32) -> NaiveDate {
    let first = first_of_month(month);
    let shifted = if delta >= 0 {
        first.checked_add_months(Months::new(delta.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Cells of a month grid: one `None` per weekday before the 1st (Sunday
/// first), then every day of the month in order.
pub fn month_days(month: NaiveDate) -> Vec<Option<NaiveDate>> {
    let first = first_of_month(month);
    let leading = first.weekday().num_days_from_sunday() as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; leading];
    cells.extend(first.iter_days().take_while(|d| d.month() == first.month()).map(Some));
    cells
}

/// `"junho de 2025"`
pub fn format_month_title(month: NaiveDate) -> String {
    format!("{} de {}", MONTH_NAMES[month.month0() as usize], month.year())
}

/// `"domingo, 1 de junho de 2025"`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize],
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DayCell {
    pub date: Option<String>,
    pub day: Option<u32>,
    pub available: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthView {
    pub month: String,
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub cells: Vec<DayCell>,
}

pub fn month_view(month: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> MonthView {
    let first = first_of_month(month);
    let cells = month_days(first)
        .into_iter()
        .map(|cell| match cell {
            Some(date) => DayCell {
                date: Some(date.format("%Y-%m-%d").to_string()),
                day: Some(date.day()),
                available: is_date_available(date, today),
                selected: selected == Some(date),
            },
            None => DayCell {
                date: None,
                day: None,
                available: false,
                selected: false,
            },
        })
        .collect();

    MonthView {
        month: first.format("%Y-%m").to_string(),
        title: format_month_title(first),
        weekdays: WEEKDAY_HEADERS,
        cells,
    }
}
