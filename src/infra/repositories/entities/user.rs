//! SeaORM entity for the users table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::{User, UserRole, UserStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Matches the identity provider's subject id, so no auto increment.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: String,
    pub status: String,
    pub ban_reason: Option<String>,
    pub ban_end_date: Option<DateTime<Utc>>,
    pub banned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        User {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            role: UserRole::from(m.role.as_str()),
            status: UserStatus::from(m.status.as_str()),
            ban_reason: m.ban_reason,
            ban_end_date: m.ban_end_date,
            banned_at: m.banned_at,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
