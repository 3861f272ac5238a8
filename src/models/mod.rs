pub mod booking;
pub mod fixture;

pub use booking::{Booking, BookingStatus, NewBooking};
pub use fixture::{Entrepreneur, MockData, Service, ServiceDetails};
