use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub service_id: i64,
    pub service_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub mode_of_payment: String,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

/// Insert payload for a booking request. The id, status and created_at
/// columns are assigned by the database.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub service_id: i64,
    pub service_name: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub mode_of_payment: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Declined,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Declined => "declined",
        }
    }

    /// Strict parse used to validate caller-supplied status values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "approved" => Some(BookingStatus::Approved),
            "declined" => Some(BookingStatus::Declined),
            _ => None,
        }
    }

    /// Lenient parse for rows read back from the database.
    pub fn parse(s: &str) -> Self {
        Self::from_str(s).unwrap_or(BookingStatus::Pending)
    }
}
