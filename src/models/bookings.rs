use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::hotel::Hotel;

/// Only `Confirmed` is ever written by the booking flow. Cancellation
/// deletes the record instead of transitioning it, so the other variants
/// exist to read data produced elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// Immutable snapshot stored in the account's booking list. Hotel fields
/// are denormalized at creation time; later catalog edits must not change
/// past bookings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Booking {
    pub hotel_id: String,
    pub hotel_name: String,
    pub hotel_image: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub guests: u32,
    pub rooms: u32,
    pub nights: i64,
    pub price_per_night: i64,
    pub total_cost: i64,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
}

/// Creation input. The client sends the hotel it is booking along with the
/// stay details; the service validates everything again before writing.
/// A missing checkout falls back to one night after check-in, the same
/// default the booking form starts from.
#[derive(Debug, Deserialize)]
pub struct BookingRequest {
    pub hotel: Hotel,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub guests: u32,
    pub rooms: u32,
}
