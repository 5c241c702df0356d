//! SeaORM entity for the bookings table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::{Booking, BookingStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub facility_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: String,
    pub status: String,
    /// JSON list of requested equipment items.
    pub equipment: Option<Json>,
    pub admin_response: Option<String>,
    /// Typed JSON equipment preparation status.
    pub equipment_status: Option<Json>,
    pub arrival_confirmed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Booking {
    fn from(m: Model) -> Self {
        Booking {
            id: m.id,
            user_id: m.user_id,
            facility_id: m.facility_id,
            start_time: m.start_time,
            end_time: m.end_time,
            purpose: m.purpose,
            status: BookingStatus::from(m.status.as_str()),
            equipment: m
                .equipment
                .and_then(|v| serde_json::from_value(v).ok()),
            admin_response: m.admin_response,
            equipment_status: m
                .equipment_status
                .and_then(|v| serde_json::from_value(v).ok()),
            arrival_confirmed: m.arrival_confirmed,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
