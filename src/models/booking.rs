use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub service_id: i64,
    pub user_id: i64,
    /// `YYYY-MM-DD` in the booking client's local timezone.
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    pub created_at: String,
}

/// A booking as submitted by a caller, before the facade assigns `id` and `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub service_id: i64,
    pub user_id: i64,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
}

impl NewBooking {
    pub fn into_booking(self, id: i64, created_at: String) -> Booking {
        Booking {
            id,
            service_id: self.service_id,
            user_id: self.user_id,
            date: self.date,
            time: self.time,
            status: self.status,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Label shown on the profile page.
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "Confirmado",
            BookingStatus::Pending => "Pendente",
            BookingStatus::Completed => "Concluído",
            BookingStatus::Cancelled => "Cancelado",
        }
    }

    pub fn is_upcoming(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}
