//! SeaORM entity for the activity_logs table.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain::ActivityLog;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub details: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ActivityLog {
    fn from(m: Model) -> Self {
        ActivityLog {
            id: m.id,
            user_id: m.user_id,
            action: m.action,
            details: m.details,
            ip_address: m.ip_address,
            user_agent: m.user_agent,
            created_at: m.created_at,
        }
    }
}
