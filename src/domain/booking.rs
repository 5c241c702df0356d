//! Booking domain entity, status transitions and the overlap predicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{
    BOOKING_APPROVED, BOOKING_CANCELLED, BOOKING_DENIED, BOOKING_EXPIRED, BOOKING_PENDING,
};

/// Booking lifecycle states.
///
/// `pending -> approved | denied | cancelled`
/// `approved -> cancelled | expired`
/// `denied`, `cancelled` and `expired` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Denied,
    Cancelled,
    Expired,
}

impl BookingStatus {
    /// Whether this booking still occupies its time slot on the calendar.
    pub fn blocks_calendar(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Approved)
    }

    /// Whether a transition to `next` is allowed by the state machine.
    pub fn can_transition(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Denied)
                | (Pending, Cancelled)
                | (Approved, Cancelled)
                | (Approved, Expired)
        )
    }
}

impl From<&str> for BookingStatus {
    fn from(s: &str) -> Self {
        match s {
            BOOKING_APPROVED => BookingStatus::Approved,
            BOOKING_DENIED => BookingStatus::Denied,
            BOOKING_CANCELLED => BookingStatus::Cancelled,
            BOOKING_EXPIRED => BookingStatus::Expired,
            _ => BookingStatus::Pending,
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BookingStatus::Pending => BOOKING_PENDING,
            BookingStatus::Approved => BOOKING_APPROVED,
            BookingStatus::Denied => BOOKING_DENIED,
            BookingStatus::Cancelled => BOOKING_CANCELLED,
            BookingStatus::Expired => BOOKING_EXPIRED,
        };
        write!(f, "{}", s)
    }
}

/// Preparation state of requested equipment, set by admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentState {
    Prepared,
    NotAvailable,
}

/// Typed equipment status attached to a booking by the needs operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EquipmentStatus {
    pub status: EquipmentState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Booking domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: BookingStatus,
    /// Equipment items requested by the student, if any.
    pub equipment: Option<Vec<String>>,
    /// Free-text note recorded by the admin on approve/deny.
    pub admin_response: Option<String>,
    /// Structured equipment preparation status (needs operation).
    pub equipment_status: Option<EquipmentStatus>,
    pub arrival_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a new booking request.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub equipment: Option<Vec<String>>,
}

/// Half-open interval intersection test used to detect double-booking.
///
/// Intervals `[a_start, a_end)` and `[b_start, b_end)` overlap iff
/// `a_start < b_end && a_end > b_start`. Back-to-back bookings sharing a
/// boundary instant do not overlap.
///
/// This function is the canonical definition of the conflict rule. The
/// enforced check runs as SQL in `BookingStore::find_conflict`, which must
/// stay equivalent to this predicate restricted to calendar-blocking
/// statuses.
pub fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Booking response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: BookingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_status: Option<EquipmentStatus>,
    pub arrival_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        Self {
            id: b.id,
            user_id: b.user_id,
            facility_id: b.facility_id,
            start_time: b.start_time,
            end_time: b.end_time,
            purpose: b.purpose,
            status: b.status,
            equipment: b.equipment,
            admin_response: b.admin_response,
            equipment_status: b.equipment_status,
            arrival_confirmed: b.arrival_confirmed,
            created_at: b.created_at,
        }
    }
}
