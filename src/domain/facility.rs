//! Facility domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A bookable facility (room, lab, court).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
    /// Inactive facilities are hidden from students and reject new bookings.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for a new facility.
#[derive(Debug, Clone)]
pub struct NewFacility {
    pub name: String,
    pub description: Option<String>,
    pub capacity: i32,
}

/// Partial update applied to an existing facility.
#[derive(Debug, Clone, Default)]
pub struct FacilityChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<i32>,
    pub is_active: Option<bool>,
}

/// Facility response payload
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacilityResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub capacity: i32,
    pub is_active: bool,
}

impl From<Facility> for FacilityResponse {
    fn from(f: Facility) -> Self {
        Self {
            id: f.id,
            name: f.name,
            description: f.description,
            capacity: f.capacity,
            is_active: f.is_active,
        }
    }
}
