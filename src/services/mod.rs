pub mod booking;
pub mod calendar;
pub mod clock;
pub mod profile;
pub mod selection;
